// File: src/core/timer.rs

/// A one-shot task due at a point on the host clock.
///
/// Owned by whichever state machine scheduled it. Rescheduling replaces
/// the previous deadline, so there is never more than one pending firing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduledTask {
    due_ms: Option<u64>,
}

impl ScheduledTask {
    pub const fn idle() -> Self {
        Self { due_ms: None }
    }

    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64) {
        self.due_ms = Some(now_ms.saturating_add(delay_ms));
    }

    pub fn cancel(&mut self) {
        self.due_ms = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due_ms.is_some()
    }

    pub fn due_ms(&self) -> Option<u64> {
        self.due_ms
    }

    /// Returns `true` exactly once, on the first poll at or after the deadline.
    pub fn fire_if_due(&mut self, now_ms: u64) -> bool {
        match self.due_ms {
            Some(due) if now_ms >= due => {
                self.due_ms = None;
                true
            }
            _ => false,
        }
    }
}

/// A message that hides itself after a fixed duration.
#[derive(Debug, Clone)]
pub struct Banner<T> {
    content: Option<T>,
    hide: ScheduledTask,
}

impl<T> Default for Banner<T> {
    fn default() -> Self {
        Self {
            content: None,
            hide: ScheduledTask::idle(),
        }
    }
}

impl<T> Banner<T> {
    pub fn show(&mut self, content: T, now_ms: u64, duration_ms: u64) {
        self.content = Some(content);
        self.hide.schedule(now_ms, duration_ms);
    }

    pub fn hide(&mut self) {
        self.content = None;
        self.hide.cancel();
    }

    pub fn current(&self) -> Option<&T> {
        self.content.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.content.is_some()
    }

    pub fn tick(&mut self, now_ms: u64) {
        if self.hide.fire_if_due(now_ms) {
            self.content = None;
        }
    }
}

/// Reveals text one character at a time.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    started_ms: u64,
    char_interval_ms: u64,
}

impl Typewriter {
    pub fn start(text: impl Into<String>, now_ms: u64, char_interval_ms: u64) -> Self {
        Self {
            text: text.into(),
            started_ms: now_ms,
            char_interval_ms: char_interval_ms.max(1),
        }
    }

    pub fn visible(&self, now_ms: u64) -> &str {
        let elapsed = now_ms.saturating_sub(self.started_ms);
        let shown = usize::try_from(elapsed / self.char_interval_ms).unwrap_or(usize::MAX);
        match self.text.char_indices().nth(shown) {
            Some((byte_idx, _)) => &self.text[..byte_idx],
            None => &self.text,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        self.visible(now_ms).len() == self.text.len()
    }

    pub fn full_text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_fires_once_and_can_be_cancelled() {
        let mut task = ScheduledTask::idle();
        task.schedule(1_000, 150);
        assert!(!task.fire_if_due(1_149));
        assert!(task.fire_if_due(1_150));
        assert!(!task.fire_if_due(2_000));

        task.schedule(3_000, 150);
        task.cancel();
        assert!(!task.fire_if_due(5_000));
    }

    #[test]
    fn banner_hides_after_its_duration() {
        let mut banner = Banner::default();
        banner.show("saved", 0, 3_000);
        banner.tick(2_999);
        assert_eq!(banner.current(), Some(&"saved"));
        banner.tick(3_000);
        assert!(!banner.is_visible());
    }

    #[test]
    fn reshowing_a_banner_restarts_the_timer() {
        let mut banner = Banner::default();
        banner.show(1, 0, 5_000);
        banner.show(2, 4_000, 5_000);
        banner.tick(6_000);
        assert_eq!(banner.current(), Some(&2));
    }

    #[test]
    fn typewriter_reveals_by_characters() {
        let tw = Typewriter::start("no cap 🔥", 100, 10);
        assert_eq!(tw.visible(100), "");
        assert_eq!(tw.visible(130), "no ");
        assert!(!tw.is_done(170));
        assert_eq!(tw.visible(180), "no cap 🔥");
        assert!(tw.is_done(10_000));
    }
}
