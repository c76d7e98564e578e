use clap::Args;

use super::{confirm_pending, open_session, print_json, CommandResult};

#[derive(Args)]
pub struct ResetArgs {
    /// Confirm the reset
    #[arg(long)]
    yes: bool,
    /// Enable developer mode for this invocation
    #[arg(long)]
    dev: bool,
}

pub fn run(args: ResetArgs) -> CommandResult {
    let (config, mut session) = open_session(args.dev)?;
    session.request_reset()?;
    confirm_pending(&mut session, &config, args.yes)?;
    print_json(&session.selected_streak())
}
