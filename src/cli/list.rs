use std::{io::Write, path::Path};

use anyhow::Result;
use clap::Parser;

use crate::{
    session::presenter::Presenter,
    storage::{activity_log::ActivityLog, slot::FileSlot},
};

#[derive(Debug, Parser)]
pub struct ListCommand {
    #[arg(short = 'n', long, help = "Show only the N most recent activities")]
    limit: Option<usize>,
    #[arg(long, help = "Print activities as a JSON array, newest first")]
    json: bool,
}

/// Prints the persisted activity log, newest first.
pub async fn process_list_command(
    ListCommand { limit, json }: ListCommand,
    dir: &Path,
    out: impl Write,
    colored: bool,
) -> Result<()> {
    let log = ActivityLog::load(FileSlot::new(dir)?).await?;
    let mut presenter = Presenter::new(out, colored);
    if json {
        presenter.activities_json(&log, limit)?;
    } else {
        presenter.activities(&log, limit)?;
    }
    Ok(())
}
