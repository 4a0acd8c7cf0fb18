use anyhow::Result;
use chronoflow::{
    cli::{run_cli, Args},
    utils::runtime::single_thread_runtime,
};
use clap::Parser;
use tracing::error;

fn main() -> Result<()> {
    let args = Args::parse();
    let runtime = single_thread_runtime()?;

    let result = runtime.block_on(run_cli(args)).inspect_err(|e| {
        error!("Error running cli {e:?}");
    });

    // Reading stdin parks a blocking thread that never returns on its own, don't wait for it.
    runtime.shutdown_background();
    result
}
