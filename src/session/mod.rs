use std::{io::Write, path::Path, time::Duration};

use anyhow::Result;
use command::Command;
use controller::Session;
use input::InputModule;
use presenter::Presenter;
use ticker::Ticker;
use tokio::{
    io::{AsyncBufRead, BufReader},
    sync::mpsc,
};
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::{
    storage::{
        activity_log::ActivityLog,
        slot::{FileSlot, LogSlot},
    },
    tracker::Tracker,
    utils::clock::{Clock, DefaultClock},
};

pub mod command;
pub mod controller;
pub mod input;
pub mod presenter;
pub mod shutdown;
pub mod ticker;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

const COMMAND_BUFFER: usize = 10;

/// Starting point of an interactive tracking session reading commands from stdin.
pub async fn start_session(dir: &Path, colored: bool) -> Result<()> {
    let (sender, receiver) = mpsc::channel::<Command>(COMMAND_BUFFER);
    let shutdown_token = CancellationToken::new();

    let input = create_input(sender, BufReader::new(tokio::io::stdin()), &shutdown_token);

    let log = ActivityLog::load(FileSlot::new(dir)?).await?;
    let mut session = create_session(
        receiver,
        log,
        Presenter::new(std::io::stdout(), colored),
        &shutdown_token,
        DefaultClock,
    );

    let (_, input_result, session_result) = tokio::join!(
        shutdown::detect_shutdown(shutdown_token.clone()),
        input.run(),
        session.run(),
    );

    if let Err(input_result) = input_result {
        error!("Input module got an error {:?}", input_result);
    }

    session_result
}

fn create_input<R: AsyncBufRead + Unpin>(
    sender: mpsc::Sender<Command>,
    reader: R,
    shutdown_token: &CancellationToken,
) -> InputModule<R> {
    InputModule::new(sender, reader, shutdown_token.clone())
}

fn create_session<S: LogSlot, W: Write>(
    receiver: mpsc::Receiver<Command>,
    log: ActivityLog<S>,
    presenter: Presenter<W>,
    shutdown_token: &CancellationToken,
    clock: impl Clock,
) -> Session<S, W> {
    Session::new(
        receiver,
        Tracker::default(),
        log,
        Ticker::new(TICK_PERIOD),
        Box::new(clock),
        presenter,
        shutdown_token.clone(),
    )
}
