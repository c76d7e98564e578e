use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "daystreak", version, about = "Daystreak habit tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Streak management
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Mark or unmark a day on the selected streak
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Month calendar for the selected streak
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Clear every completed day of the selected streak
    Reset(commands::reset::ResetArgs),
    /// Dark mode preference
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("DAYSTREAK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Streak { action } => commands::streak::run(action),
        Commands::Day { action } => commands::day::run(action),
        Commands::Calendar { action } => commands::calendar::run(action),
        Commands::Reset(args) => commands::reset::run(args),
        Commands::Theme { action } => commands::theme::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            commands::completions::run::<Cli>(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
