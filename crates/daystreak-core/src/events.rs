use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Notifications raised by the calendar controller for the presentation
/// layer. Each fires once per occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A toggle turned `day` from open to completed.
    DayCompleted {
        streak_id: String,
        day: NaiveDate,
        at: DateTime<Utc>,
    },
    /// The current streak just moved onto `length`, 7 or a later multiple of 7.
    MilestoneReached {
        streak_id: String,
        length: u32,
        at: DateTime<Utc>,
    },
}
