use std::{
    future::Future,
    io::ErrorKind,
    ops::Deref,
    path::{Path, PathBuf},
};

use anyhow::Result;
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
};
use tracing::debug;

/// Name of the slot the activity log is persisted into.
pub const ACTIVITIES_SLOT: &str = "chronoFlowActivities.json";

/// A single named place the whole activity log is written into. The slot knows nothing about
/// the format of the payload, it only stores and returns bytes.
pub trait LogSlot {
    /// Returns the stored payload, or `None` if nothing was ever written.
    fn read(&self) -> impl Future<Output = Result<Option<Vec<u8>>>>;

    /// Replaces the stored payload.
    fn write(&self, payload: &[u8]) -> impl Future<Output = Result<()>>;

    /// Removes the stored payload. Clearing an empty slot is not an error.
    fn clear(&self) -> impl Future<Output = Result<()>>;
}

impl<T: Deref> LogSlot for T
where
    T::Target: LogSlot,
{
    fn read(&self) -> impl Future<Output = Result<Option<Vec<u8>>>> {
        self.deref().read()
    }

    fn write(&self, payload: &[u8]) -> impl Future<Output = Result<()>> {
        self.deref().write(payload)
    }

    fn clear(&self) -> impl Future<Output = Result<()>> {
        self.deref().clear()
    }
}

/// Slot backed by a single file. Reads take a shared lock and writes an exclusive one, so a
/// `list` running next to a `track` session never sees a half written file.
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(dir: &Path) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(dir)?;

        Ok(Self {
            path: dir.join(ACTIVITIES_SLOT),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_with_file(file: &mut File, payload: &[u8]) -> Result<()> {
        file.set_len(0).await?;
        file.rewind().await?;
        file.write_all(payload).await?;
        file.flush().await?;
        file.sync_data().await?;
        Ok(())
    }
}

impl LogSlot for FileSlot {
    async fn read(&self) -> Result<Option<Vec<u8>>> {
        async fn extract(path: &Path) -> std::result::Result<Vec<u8>, std::io::Error> {
            debug!("Reading {path:?}");
            let mut file = File::open(path).await?;
            file.lock_shared()?;
            let mut payload = Vec::new();
            let result = file.read_to_end(&mut payload).await;
            file.unlock_async().await?;
            result?;
            Ok(payload)
        }

        // An empty file is what a concurrent `clear` leaves behind before removing it.
        match extract(&self.path).await {
            Ok(payload) if payload.is_empty() => Ok(None),
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)?,
        }
    }

    async fn write(&self, payload: &[u8]) -> Result<()> {
        let mut file = File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .await?;

        // Truncation happens under the lock, opening with truncate would race readers.
        file.lock_exclusive()?;
        let result = Self::write_with_file(&mut file, payload).await;
        file.unlock_async().await?;
        result
    }

    async fn clear(&self) -> Result<()> {
        let file = match File::options().write(true).open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => Err(e)?,
        };

        // The payload is dropped under the lock, so a reader holding the shared lock finishes
        // with the old payload and anyone after it sees an empty slot.
        file.lock_exclusive()?;
        let result = file.set_len(0).await;
        file.unlock_async().await?;
        result?;

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)?,
        }
    }
}

#[cfg(test)]
pub use memory::MemorySlot;
