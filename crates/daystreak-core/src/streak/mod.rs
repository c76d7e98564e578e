//! Streak data and the rules that keep it consistent.

pub mod calculator;
mod model;
mod store;

pub use calculator::{current_streak_length, is_milestone, total_completed, MAX_SCAN_DAYS, MILESTONE_INTERVAL};
pub use model::{Streak, StreakStats, StreaksData};
pub use store::{DayToggle, StreakStore};
