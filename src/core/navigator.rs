// File: src/core/navigator.rs

/// Cursor over the video feed.
///
/// The index stays in `[0, count)` whenever the feed is non-empty; any
/// request outside that range is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedNavigator {
    index: usize,
    count: usize,
}

impl FeedNavigator {
    pub fn new(count: usize) -> Self {
        Self { index: 0, count }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Replaces the feed length and rewinds to the first video.
    pub fn reset(&mut self, count: usize) {
        self.index = 0;
        self.count = count;
    }

    /// Returns `true` when the request was in range. The caller then resets
    /// per-video state, even if the index did not change.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.count {
            return false;
        }
        self.index = index;
        true
    }

    pub fn advance(&mut self) -> bool {
        match self.index.checked_add(1) {
            Some(next) => self.go_to(next),
            None => false,
        }
    }

    pub fn retreat(&mut self) -> bool {
        match self.index.checked_sub(1) {
            Some(prev) => self.go_to(prev),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_requests_do_nothing() {
        let mut nav = FeedNavigator::new(3);
        nav.go_to(1);
        for bad in [3, 4, 100, usize::MAX] {
            assert!(!nav.go_to(bad));
            assert_eq!(nav.index(), 1);
        }
    }

    #[test]
    fn advance_stops_at_the_last_video() {
        let mut nav = FeedNavigator::new(3);
        nav.go_to(1);
        assert!(nav.advance());
        assert_eq!(nav.index(), 2);
        assert!(!nav.advance());
        assert_eq!(nav.index(), 2);
        assert!(nav.retreat());
        assert_eq!(nav.index(), 1);
    }

    #[test]
    fn retreat_at_zero_and_empty_feed() {
        let mut nav = FeedNavigator::new(2);
        assert!(!nav.retreat());
        assert_eq!(nav.index(), 0);

        let mut empty = FeedNavigator::default();
        assert!(!empty.go_to(0));
        assert!(!empty.advance());
        assert!(empty.is_empty());
    }
}
