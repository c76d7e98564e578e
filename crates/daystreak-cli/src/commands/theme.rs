use clap::Subcommand;
use daystreak_core::storage::{load_dark_mode, save_dark_mode};
use daystreak_core::Config;
use serde_json::json;

use super::{open_database, print_json, CommandResult};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the dark mode flag
    Get,
    /// Set the dark mode flag
    Set {
        /// true or false
        #[arg(action = clap::ArgAction::Set)]
        dark: bool,
    },
}

pub fn run(action: ThemeAction) -> CommandResult {
    let config = Config::load()?;
    let db = open_database(&config)?;
    let dark = match action {
        ThemeAction::Get => load_dark_mode(&db),
        ThemeAction::Set { dark } => {
            save_dark_mode(&db, dark)?;
            dark
        }
    };
    print_json(&json!({ "darkMode": dark }))
}
