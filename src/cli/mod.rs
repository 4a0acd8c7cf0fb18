pub mod list;

use std::{io::IsTerminal, path::PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use list::{process_list_command, ListCommand};
use tracing::level_filters::LevelFilter;

use crate::{
    session::start_session,
    storage::slot::FileSlot,
    utils::{
        dir::{create_application_default_path, create_application_path},
        logging::{enable_logging, CLI_PREFIX, TRACK_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "ChronoFlow", version, long_about = None)]
#[command(about = "Terminal stopwatch for tracking named activities", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default uses $XDG_STATE_HOME/chronoflow or $HOME/.local/state/chronoflow"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Enable trace logging")]
    log: bool,
    #[arg(long = "log-filter", global = true, help = "Log level. Overrides RUST_LOG")]
    log_filter: Option<LevelFilter>,
    #[arg(long = "log-console", global = true, help = "Also print logs to stderr")]
    log_console: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Start an interactive tracking session")]
    Track {
        #[arg(long, help = "Don't color the output")]
        no_color: bool,
    },
    #[command(about = "Show completed activities, newest first")]
    List {
        #[command(flatten)]
        command: ListCommand,
    },
    #[command(about = "Print where completed activities are stored")]
    Path {},
}

impl Args {
    fn log_level(&self) -> Option<LevelFilter> {
        if self.log {
            Some(LevelFilter::TRACE)
        } else {
            self.log_filter
        }
    }
}

pub async fn run_cli(args: Args) -> Result<()> {
    let app_dir = match args.dir.clone() {
        Some(dir) => create_application_path(dir)?,
        None => create_application_default_path()?,
    };

    let prefix = match args.commands {
        Commands::Track { .. } => TRACK_PREFIX,
        _ => CLI_PREFIX,
    };
    enable_logging(prefix, &app_dir, args.log_level(), args.log_console)?;

    let colored = std::io::stdout().is_terminal();
    match args.commands {
        Commands::Track { no_color } => start_session(&app_dir, colored && !no_color).await,
        Commands::List { command } => {
            process_list_command(command, &app_dir, std::io::stdout().lock(), colored).await
        }
        Commands::Path {} => {
            println!("{}", FileSlot::new(&app_dir)?.path().display());
            Ok(())
        }
    }
}
