pub mod chart;
pub mod history;
pub mod log;

use std::path::PathBuf;

use anyhow::Result;
use chart::{process_chart_command, ChartCommand};
use clap::{Parser, Subcommand};
use history::{process_history_command, HistoryCommand};
use log::{process_log_command, LogCommand};
use tracing::level_filters::LevelFilter;

use crate::{
    mood::log::MoodLog,
    storage::key_value::FileStore,
    utils::{
        clock::DefaultClock,
        dir::resolve_application_path,
        logging::{enable_logging, LogSettings, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Serenity mood", version, long_about = None)]
#[command(about = "Track your mood and see how it changes over time", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Print logs to the console")]
    log: bool,
    #[arg(
        long = "log-filter",
        global = true,
        help = "Log level. By default RUST_LOG is used, or debug if it's not set"
    )]
    log_filter: Option<LevelFilter>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Save how you feel right now")]
    Log {
        #[command(flatten)]
        command: LogCommand,
    },
    #[command(about = "Show the latest mood entries, newest first")]
    History {
        #[command(flatten)]
        command: HistoryCommand,
    },
    #[command(about = "Render a chart of the last 14 entries into an SVG file")]
    Chart {
        #[command(flatten)]
        command: ChartCommand,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = resolve_application_path(args.dir)?;

    enable_logging(
        CLI_PREFIX,
        &app_dir,
        LogSettings::from_flags(args.log, args.log_filter),
    )?;

    // One store and one journal for the whole run, handed to the command that needs them.
    let store = FileStore::new(app_dir.join("storage"))?;
    let mut log = MoodLog::load(store, Box::new(DefaultClock)).await?;

    match args.commands {
        Commands::Log { command } => process_log_command(command, &mut log).await,
        Commands::History { command } => {
            process_history_command(command, &log);
            Ok(())
        }
        Commands::Chart { command } => process_chart_command(command, &log).await,
    }
}
