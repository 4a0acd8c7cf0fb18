use anyhow::Result;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::command::Command;

/// Turns lines of user input into [Command]s for the session.
pub struct InputModule<R> {
    next: mpsc::Sender<Command>,
    reader: R,
    shutdown: CancellationToken,
}

impl<R: AsyncBufRead + Unpin> InputModule<R> {
    pub fn new(next: mpsc::Sender<Command>, reader: R, shutdown: CancellationToken) -> Self {
        Self {
            next,
            reader,
            shutdown,
        }
    }

    /// Reads until the input ends, the user quits or the session shuts down. Ending drops the
    /// sender, which also ends the session.
    pub async fn run(self) -> Result<()> {
        let mut reader = self.reader;
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            let read = tokio::select! {
                _ = self.shutdown.cancelled() => return Ok(()),
                read = reader.read_until(b'\n', &mut buffer) => read?,
            };

            if read == 0 {
                info!("Input closed");
                return Ok(());
            }

            // Bytes that aren't UTF-8 end up as an unknown command instead of ending the input.
            let line = String::from_utf8_lossy(&buffer);
            let Some(command) = Command::parse(&line) else {
                continue;
            };

            debug!("Sending command {:?}", command);
            let quit = command == Command::Quit;
            if self.next.send(command).await.is_err() {
                debug!("Session is gone, stopping input");
                return Ok(());
            }
            if quit {
                return Ok(());
            }
        }
    }
}
