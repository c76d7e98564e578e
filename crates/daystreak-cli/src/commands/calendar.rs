use clap::Subcommand;
use daystreak_core::{ValidationError, YearMonth};

use super::{open_session, print_json, CommandResult};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Month grid for the selected streak
    Show {
        /// Month as YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
        /// Show every day as editable
        #[arg(long)]
        dev: bool,
    },
}

pub fn run(action: CalendarAction) -> CommandResult {
    match action {
        CalendarAction::Show { month, dev } => {
            let (_, mut session) = open_session(dev)?;
            if let Some(month) = month {
                session.show_month(YearMonth::parse(&month)?);
            }
            let view = session.month_view().ok_or(ValidationError::NoSelection)?;
            print_json(&view)?;
        }
    }
    Ok(())
}
