//! Streak management commands for CLI.

use clap::Subcommand;
use daystreak_core::{Streak, ValidationError};
use serde::Serialize;

use super::{confirm_pending, open_session, print_json, CommandResult};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Create a new streak and select it
    Create {
        /// Display name
        name: String,
    },
    /// List all streaks and the current selection
    List,
    /// Select a streak
    Select {
        /// Streak ID
        id: String,
    },
    /// Delete a streak (developer mode)
    Delete {
        /// Streak ID
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
        /// Enable developer mode for this invocation
        #[arg(long)]
        dev: bool,
    },
    /// Show a streak with its stats (defaults to the selected streak)
    Show {
        /// Streak ID
        id: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StreakDetail<'a> {
    #[serde(flatten)]
    streak: &'a Streak,
    total_completed: usize,
    selected: bool,
}

pub fn run(action: StreakAction) -> CommandResult {
    match action {
        StreakAction::Create { name } => {
            let (_, mut session) = open_session(false)?;
            let created = session.create(&name)?.ok_or(ValidationError::EmptyName)?;
            print_json(&created)?;
        }
        StreakAction::List => {
            let (_, session) = open_session(false)?;
            print_json(session.store().data())?;
        }
        StreakAction::Select { id } => {
            let (_, mut session) = open_session(false)?;
            let known = session.store().get(&id).is_some();
            if !known {
                return Err(format!("streak not found: {id}").into());
            }
            session.select(&id)?;
            print_json(&session.selected_streak())?;
        }
        StreakAction::Delete { id, yes, dev } => {
            let (config, mut session) = open_session(dev)?;
            if session.store().get(&id).is_none() {
                return Err(format!("streak not found: {id}").into());
            }
            session.request_delete(&id)?;
            confirm_pending(&mut session, &config, yes)?;
            print_json(session.store().data())?;
        }
        StreakAction::Show { id } => {
            let (_, session) = open_session(false)?;
            let store = session.store();
            let streak = match &id {
                Some(id) => store.get(id),
                None => store.selected_streak(),
            };
            let Some(streak) = streak else {
                return Err(match id {
                    Some(id) => format!("streak not found: {id}").into(),
                    None => ValidationError::NoSelection.into(),
                });
            };
            print_json(&StreakDetail {
                streak,
                total_completed: streak.stats().total_completed,
                selected: store.selected_id() == Some(streak.id.as_str()),
            })?;
        }
    }
    Ok(())
}
