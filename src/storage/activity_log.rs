use anyhow::Result;
use tracing::{debug, info, instrument, warn};

use super::{entities::ActivityRecord, slot::LogSlot};

/// Ordered list of completed activities. Storage order is completion order and is never
/// changed; every change is written through to the slot as a whole.
pub struct ActivityLog<S: LogSlot> {
    slot: S,
    records: Vec<ActivityRecord>,
}

impl<S: LogSlot> ActivityLog<S> {
    /// Loads the previously persisted log. Missing data gives an empty log. Data that can't be
    /// parsed is dropped from the slot and also gives an empty log.
    #[instrument(name = "load_activities", skip_all)]
    pub async fn load(slot: S) -> Result<Self> {
        let records = match slot.read().await? {
            None => {
                debug!("No persisted activities found");
                vec![]
            }
            Some(payload) => match serde_json::from_slice::<Vec<ActivityRecord>>(&payload) {
                Ok(records) => {
                    info!("Loaded {} activities", records.len());
                    records
                }
                Err(e) => {
                    warn!("Persisted activities are corrupted, discarding them: {e}");
                    slot.clear().await?;
                    vec![]
                }
            },
        };

        Ok(Self { slot, records })
    }

    /// Adds a record to the end of the log and persists the full log. When persisting fails
    /// the record is kept in memory and will be written out with the next change.
    pub async fn append(&mut self, record: ActivityRecord) -> Result<()> {
        debug!("Appending activity {:?}", record);
        self.records.push(record);
        self.persist().await
    }

    async fn persist(&self) -> Result<()> {
        let payload = serde_json::to_vec(&self.records)?;
        self.slot.write(&payload).await
    }

    /// Records in storage (completion) order.
    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    /// Records in display order, the most recently completed first.
    pub fn newest_first(&self) -> impl Iterator<Item = &ActivityRecord> {
        self.records.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all logged durations in seconds.
    pub fn total_seconds(&self) -> u64 {
        self.records.iter().map(|v| v.duration).sum()
    }
}
