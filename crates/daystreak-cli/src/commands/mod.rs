//! Command implementations.
//!
//! Each command opens its own short session: load config, open the database
//! it names, hand the store to a calendar controller, act, print JSON.

pub mod calendar;
pub mod completions;
pub mod config;
pub mod day;
pub mod reset;
pub mod streak;
pub mod theme;

use std::error::Error;

use daystreak_core::{
    CalendarController, Config, Database, EditMode, PendingAction, StreakPersistence, StreakStore,
    SystemClock,
};
use serde::Serialize;
use tracing::debug;

pub type Session = CalendarController<Database, SystemClock>;

pub type CommandResult<T = ()> = Result<T, Box<dyn Error>>;

/// Open the database named by `config`.
pub fn open_database(config: &Config) -> CommandResult<Database> {
    let path = config.database_path()?;
    debug!(path = %path.display(), "opening database");
    Ok(Database::open_at(path)?)
}

/// Load config and open a session. `dev` forces developer mode on top of
/// `calendar.developer_mode`.
pub fn open_session(dev: bool) -> CommandResult<(Config, Session)> {
    let config = Config::load()?;
    let db = open_database(&config)?;
    let mode = if dev || config.calendar.developer_mode {
        EditMode::Developer
    } else {
        EditMode::Normal
    };
    let store = StreakStore::open(StreakPersistence::new(db), SystemClock);
    Ok((config, CalendarController::new(store).with_mode(mode)))
}

/// Carry out the session's pending action when `yes` was passed or the
/// config waives confirmation. Otherwise the request is dropped.
pub fn confirm_pending(session: &mut Session, config: &Config, yes: bool) -> CommandResult<bool> {
    if yes || !config.calendar.confirm_destructive {
        return Ok(session.confirm()?);
    }
    let what = match session.cancel() {
        Some(PendingAction::Reset { streak_id }) => format!("reset of streak {streak_id}"),
        Some(PendingAction::Delete { streak_id }) => format!("deletion of streak {streak_id}"),
        None => "action".to_string(),
    };
    Err(format!("{what} needs confirmation; pass --yes").into())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
