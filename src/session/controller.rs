use std::io::Write;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::{
    storage::{activity_log::ActivityLog, slot::LogSlot},
    tracker::{notice::Notice, Status, Tracker},
    utils::clock::Clock,
};

use super::{command::Command, presenter::Presenter, ticker::Ticker};

enum Wakeup {
    Shutdown,
    Command(Option<Command>),
    Tick,
}

/// Owns the tracker and the activity log for the duration of a session. Commands and ticks are
/// handled one at a time on a single task, so nothing here needs locking.
pub struct Session<S: LogSlot, W: Write> {
    commands: mpsc::Receiver<Command>,
    tracker: Tracker,
    log: ActivityLog<S>,
    ticker: Ticker,
    clock: Box<dyn Clock>,
    presenter: Presenter<W>,
    shutdown: CancellationToken,
}

impl<S: LogSlot, W: Write> Session<S, W> {
    pub fn new(
        commands: mpsc::Receiver<Command>,
        tracker: Tracker,
        log: ActivityLog<S>,
        ticker: Ticker,
        clock: Box<dyn Clock>,
        presenter: Presenter<W>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            commands,
            tracker,
            log,
            ticker,
            clock,
            presenter,
            shutdown,
        }
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn log(&self) -> &ActivityLog<S> {
        &self.log
    }

    pub fn presenter(&self) -> &Presenter<W> {
        &self.presenter
    }

    /// Runs the session until the user quits, the input ends or shutdown is requested. The
    /// shutdown token is cancelled on the way out so the other session tasks stop too.
    pub async fn run(&mut self) -> Result<()> {
        let result = match self.presenter.banner() {
            Ok(()) => self.event_loop().await,
            Err(e) => Err(e.into()),
        };
        self.shutdown.cancel();

        let state = self.tracker.state();
        if state.status != Status::Idle || state.elapsed_seconds > 0 {
            warn!("Session ended with an unfinished activity, discarding {:?}", state);
        }
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        loop {
            let wakeup = tokio::select! {
                // Commands win over a tick that is due at the same time, so a pause is never
                // followed by one more second.
                biased;
                _ = self.shutdown.cancelled() => Wakeup::Shutdown,
                command = self.commands.recv() => Wakeup::Command(command),
                _ = self.ticker.wait(self.clock.as_ref()) => Wakeup::Tick,
            };

            match wakeup {
                Wakeup::Shutdown => {
                    info!("Session cancelled");
                    return Ok(());
                }
                Wakeup::Command(None) | Wakeup::Command(Some(Command::Quit)) => {
                    info!("Session finished");
                    return Ok(());
                }
                Wakeup::Command(Some(command)) => self.handle(command).await?,
                Wakeup::Tick => {
                    if self.tracker.tick() {
                        trace!(elapsed = self.tracker.elapsed(), "Tick");
                    }
                }
            }
        }
    }

    #[instrument(skip(self))]
    async fn handle(&mut self, command: Command) -> Result<()> {
        match command {
            Command::SetName(name) => match self.tracker.set_name(name) {
                Ok(Some(notice)) => self.presenter.notice(&notice)?,
                Ok(None) => (),
                Err(e) => self.presenter.notice(&e.into())?,
            },
            Command::Start => {
                let notice = self.tracker.start().unwrap_or_else(Notice::from);
                self.presenter.notice(&notice)?;
            }
            Command::Pause => {
                let notice = self.tracker.pause();
                self.presenter.notice(&notice)?;
            }
            Command::Stop => self.stop().await?,
            Command::Reset => {
                let notice = self.tracker.reset();
                self.presenter.notice(&notice)?;
            }
            Command::Status => self.presenter.status(&self.tracker)?,
            Command::List => self.presenter.activities(&self.log, None)?,
            Command::Help => self.presenter.help()?,
            Command::Unknown(word) => self.presenter.unknown(&word)?,
            Command::Quit => (),
        }

        self.sync_ticker();
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        let notice = self.tracker.stop().unwrap_or_else(Notice::from);
        if let Notice::Logged(record) = &notice {
            info!("Logging activity {:?}", record);
            if let Err(e) = self.log.append(record.clone()).await {
                error!("Failed to persist activities {e:?}");
                self.presenter.failure("Couldn't save activities", &e)?;
            }
        }
        self.presenter.notice(&notice)?;
        Ok(())
    }

    /// The ticker runs exactly while the tracker is running.
    fn sync_ticker(&mut self) {
        match (self.tracker.is_running(), self.ticker.is_active()) {
            (true, false) => {
                debug!("Starting ticker");
                self.ticker.start(self.clock.instant());
            }
            (false, true) => {
                debug!("Stopping ticker");
                self.ticker.stop();
            }
            _ => (),
        }
    }
}
