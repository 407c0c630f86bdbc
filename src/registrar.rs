use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::DeliveryError;
use crate::slack::MessageSink;
use crate::store::write_atomic;

pub const THREAD_RECORD_FILE: &str = "thread_record.json";

/// The one persisted thread: valid for reuse only while `date` is still
/// today. Overwritten on day rollover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadRecord {
    pub date: NaiveDate,
    pub thread_id: String,
}

/// Hands out the delivery thread for the current day, creating one via
/// the sink when none exists yet (first run, or a new calendar day).
pub struct ThreadRegistrar {
    path: PathBuf,
}

impl ThreadRegistrar {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(THREAD_RECORD_FILE),
        }
    }

    /// On failure the stale record, if any, is left in place; the next
    /// attempt starts from the same state.
    pub fn get_or_create(
        &self,
        sink: &dyn MessageSink,
        today: NaiveDate,
    ) -> Result<String, DeliveryError> {
        if let Some(record) = self.load()
            && record.date == today
        {
            debug!("reusing thread {} for {}", record.thread_id, today);
            return Ok(record.thread_id);
        }

        info!("creating thread for {}", today);
        let thread_id = sink.create_thread(&format!("RSS Updates for {}", today))?;

        let record = ThreadRecord {
            date: today,
            thread_id: thread_id.clone(),
        };
        if let Err(e) = self.persist(&record) {
            // The thread exists, so keep going; worst case we create a
            // duplicate thread on the next restart.
            warn!("could not persist thread record: {}", e);
        }
        Ok(thread_id)
    }

    fn load(&self) -> Option<ThreadRecord> {
        let data = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&data) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("{} is corrupt, ignoring: {}", self.path.display(), e);
                None
            }
        }
    }

    fn persist(&self, record: &ThreadRecord) -> anyhow::Result<()> {
        write_atomic(&self.path, &serde_json::to_string(record)?)
    }
}
