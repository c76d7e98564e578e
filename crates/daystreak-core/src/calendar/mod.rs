mod controller;
mod milestone;
mod month;

pub use controller::{CalendarController, EditMode, PendingAction};
pub use milestone::MilestoneTracker;
pub use month::{DayCell, MonthView, YearMonth};
