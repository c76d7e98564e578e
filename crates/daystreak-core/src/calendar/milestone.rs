//! Edge-triggered milestone detection.
//!
//! The tracker remembers the last length it saw for each streak. A milestone
//! is announced only when a streak moves onto a milestone length from a
//! smaller one, so re-observing the same length (after a re-render, a month
//! change or a selection) stays silent. A streak seen for the first time only
//! sets the baseline.

use std::collections::HashMap;

use crate::streak::is_milestone;

#[derive(Debug, Default, Clone)]
pub struct MilestoneTracker {
    last_seen: HashMap<String, u32>,
}

impl MilestoneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a baseline without announcing anything.
    pub fn seed(&mut self, streak_id: &str, length: u32) {
        self.last_seen.insert(streak_id.to_string(), length);
    }

    /// Record the latest length; returns true when it crosses into a milestone.
    pub fn observe(&mut self, streak_id: &str, length: u32) -> bool {
        match self.last_seen.insert(streak_id.to_string(), length) {
            Some(previous) => length > previous && is_milestone(length),
            None => false,
        }
    }

    pub fn forget(&mut self, streak_id: &str) {
        self.last_seen.remove(streak_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_on_transition_only() {
        let mut tracker = MilestoneTracker::new();
        tracker.seed("s", 6);
        assert!(tracker.observe("s", 7));
        assert!(!tracker.observe("s", 7));
        assert!(!tracker.observe("s", 8));
    }

    #[test]
    fn refires_after_dropping_below() {
        let mut tracker = MilestoneTracker::new();
        tracker.seed("s", 13);
        assert!(tracker.observe("s", 14));
        assert!(!tracker.observe("s", 13));
        assert!(tracker.observe("s", 14));
    }

    #[test]
    fn first_observation_is_a_baseline() {
        let mut tracker = MilestoneTracker::new();
        assert!(!tracker.observe("s", 7));
        assert!(tracker.observe("s", 14));
    }

    #[test]
    fn non_milestone_increase_is_silent() {
        let mut tracker = MilestoneTracker::new();
        tracker.seed("s", 5);
        assert!(!tracker.observe("s", 8));
        tracker.forget("s");
        assert!(!tracker.observe("s", 14));
    }
}
