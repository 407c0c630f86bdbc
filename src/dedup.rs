use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::store::write_atomic;

pub const POSTED_ENTRIES_FILE: &str = "posted_entries.json";

/// Persistent record of which entries have already been posted, keyed by
/// feed URL. Each feed maps to its fingerprints in first-seen order, so
/// pruning can evict the oldest ones first.
pub struct SeenStore {
    path: PathBuf,
    entries: BTreeMap<String, Vec<String>>,
}

impl SeenStore {
    /// Loads the store from `state_dir`. A missing file is a first run; a
    /// corrupt file is logged and treated as empty rather than aborting
    /// the cycle.
    pub fn load(state_dir: &Path) -> Self {
        let path = state_dir.join(POSTED_ENTRIES_FILE);
        let entries = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("{} is corrupt, starting fresh: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }

    pub fn is_new(&self, feed_url: &str, fingerprint: &str) -> bool {
        !self
            .entries
            .get(feed_url)
            .is_some_and(|seen| seen.iter().any(|fp| fp == fingerprint))
    }

    /// Appends the fingerprint if absent; recording the same fingerprint
    /// twice is a no-op.
    pub fn record(&mut self, feed_url: &str, fingerprint: &str) {
        let seen = self.entries.entry(feed_url.to_string()).or_default();
        if !seen.iter().any(|fp| fp == fingerprint) {
            seen.push(fingerprint.to_string());
        }
    }

    /// Truncates every feed's history to its most recent `keep` entries,
    /// including feeds no longer in the configured list.
    pub fn prune_all(&mut self, keep: usize) {
        for seen in self.entries.values_mut() {
            if seen.len() > keep {
                seen.drain(..seen.len() - keep);
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        write_atomic(&self.path, &serde_json::to_string(&self.entries)?)
    }
}
