//! # Daystreak Core Library
//!
//! This library provides the core logic for Daystreak, a daily habit tracker.
//! Every front end (the bundled CLI included) is a thin layer over the same
//! store and calendar rules.
//!
//! ## Architecture
//!
//! - **Date utility**: one canonical `YYYY-MM-DD` form for local calendar days,
//!   and a [`Clock`] that supplies "today"
//! - **Streak calculator**: consecutive-day counting with a one-day grace
//!   window, capped at 365 days
//! - **Streak store**: the single owner of [`StreaksData`]; every mutation
//!   re-derives cached lengths and writes the full aggregate through
//! - **Storage**: SQLite key-value slots and TOML-based configuration
//! - **Calendar controller**: edit permissions, developer mode, month
//!   navigation and edge-triggered milestone events
//!
//! ## Key Components
//!
//! - [`StreakStore`]: streak aggregate and its mutations
//! - [`CalendarController`]: session facade for user input
//! - [`Database`]: durable key-value slots
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod date;
pub mod error;
pub mod events;
pub mod storage;
pub mod streak;

pub use calendar::{CalendarController, DayCell, EditMode, MonthView, PendingAction, YearMonth};
pub use date::{canonical_day, parse_day, Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use events::Event;
pub use storage::{Config, Database, KeyValueStore, MemoryStore, StreakPersistence};
pub use streak::{current_streak_length, DayToggle, Streak, StreakStats, StreakStore, StreaksData};
