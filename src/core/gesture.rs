// File: src/core/gesture.rs

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Advance,
    Retreat,
}

/// Turns wheel and touch input into feed navigation.
///
/// While the comment panel is open every gesture is swallowed; the panel
/// only closes through an explicit close action.
#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    swipe_threshold: f32,
    touch_start: Option<f32>,
    touch_last: Option<f32>,
}

impl GestureInterpreter {
    pub fn new(swipe_threshold: f32) -> Self {
        Self {
            swipe_threshold,
            touch_start: None,
            touch_last: None,
        }
    }

    pub fn wheel(&mut self, delta_y: f32, panel_open: bool) -> Option<NavCommand> {
        if panel_open {
            return None;
        }
        if delta_y > 0.0 {
            Some(NavCommand::Advance)
        } else if delta_y < 0.0 {
            Some(NavCommand::Retreat)
        } else {
            None
        }
    }

    pub fn touch_start(&mut self, y: f32, panel_open: bool) {
        if panel_open {
            return;
        }
        self.touch_start = Some(y);
        self.touch_last = None;
    }

    pub fn touch_move(&mut self, y: f32, panel_open: bool) {
        if panel_open || self.touch_start.is_none() {
            return;
        }
        self.touch_last = Some(y);
    }

    /// Classifies the finished swipe. Recorded coordinates are always cleared.
    pub fn touch_end(&mut self, panel_open: bool) -> Option<NavCommand> {
        let start = self.touch_start.take();
        let last = self.touch_last.take();
        if panel_open {
            return None;
        }
        let start = start?;
        // No move event means the finger never travelled.
        let end = last.unwrap_or(start);
        let distance = start - end;

        if distance > self.swipe_threshold {
            Some(NavCommand::Advance)
        } else if distance < -self.swipe_threshold {
            Some(NavCommand::Retreat)
        } else {
            None
        }
    }
}
