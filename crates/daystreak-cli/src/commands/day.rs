use clap::Subcommand;
use daystreak_core::{Event, Streak};
use serde::Serialize;

use super::{open_session, print_json, CommandResult};

#[derive(Subcommand)]
pub enum DayAction {
    /// Mark a day done, or undo it if already marked
    Toggle {
        /// Day as YYYY-MM-DD (default: today)
        day: Option<String>,
        /// Allow days other than today
        #[arg(long)]
        dev: bool,
    },
}

#[derive(Serialize)]
struct ToggleOutput<'a> {
    streak: Option<&'a Streak>,
    events: Vec<Event>,
}

pub fn run(action: DayAction) -> CommandResult {
    match action {
        DayAction::Toggle { day, dev } => {
            let (_, mut session) = open_session(dev)?;
            let events = match day {
                Some(day) => session.toggle_day_str(&day)?,
                None => {
                    let today = session.store().today();
                    session.toggle_day(today)?
                }
            };
            for event in &events {
                if let Event::MilestoneReached { length, .. } = event {
                    if let Some(streak) = session.selected_streak() {
                        eprintln!("{length} days in a row on \"{}\"!", streak.name);
                    }
                }
            }
            print_json(&ToggleOutput {
                streak: session.selected_streak(),
                events,
            })?;
        }
    }
    Ok(())
}
