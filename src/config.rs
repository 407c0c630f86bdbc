use std::path::PathBuf;
use std::time::Duration;

/// Immutable runtime configuration, assembled once in `main` and passed
/// down by reference. No component reads the environment on its own.
#[derive(Debug, Clone)]
pub struct Config {
    /// Feed URLs, polled in this order every cycle.
    pub feeds: Vec<String>,
    /// Directory holding `posted_entries.json` and `thread_record.json`.
    pub state_dir: PathBuf,
    /// Maximum age an entry may have and still be posted.
    pub recency_window: chrono::Duration,
    /// Entries posted per feed per cycle; qualifying entries beyond the
    /// cap are still recorded as seen.
    pub max_posts_per_feed: usize,
    /// Fingerprints kept per feed after pruning.
    pub history_keep: usize,
    /// Pause between poll cycles.
    pub poll_interval: Duration,
    /// Pause before retrying a failed thread creation.
    pub retry_backoff: Duration,
}
