use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::config::Config;
use crate::dedup::SeenStore;
use crate::feed::{FeedTransport, fingerprint};
use crate::slack::MessageSink;

/// One pass over every configured feed: fetch, filter against the seen
/// store and the recency window, post the survivors, persist.
///
/// A feed that fails to fetch or an entry that fails to post is logged
/// and skipped; neither aborts the cycle. Fingerprints are recorded
/// before posting, so a delivery failure never causes a duplicate on the
/// next cycle (at-most-once, by contract).
pub fn run_cycle(
    config: &Config,
    transport: &dyn FeedTransport,
    sink: &dyn MessageSink,
    thread_id: &str,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let mut seen = SeenStore::load(&config.state_dir);

    for feed_url in &config.feeds {
        debug!("checking feed {}", feed_url);
        let doc = match transport.fetch(feed_url) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("skipping {} this cycle: {}", feed_url, e);
                continue;
            }
        };

        let mut fresh = Vec::new();
        for entry in &doc.entries {
            let fp = fingerprint(&entry.url);
            if !seen.is_new(feed_url, &fp) {
                continue;
            }
            // No publish date means age zero: never drop an entry just
            // because the feed omits timestamps.
            let age = entry
                .published
                .map(|published| now - published)
                .unwrap_or_else(chrono::Duration::zero);
            if age > config.recency_window {
                continue;
            }
            // Recorded even when over the post cap, so capped entries do
            // not come back next cycle.
            seen.record(feed_url, &fp);
            fresh.push(entry);
        }

        for entry in fresh.iter().take(config.max_posts_per_feed) {
            let text = format!(
                "New post from {}: {}\n{}",
                doc.title, entry.title, entry.url
            );
            if let Err(e) = sink.post_message(thread_id, &text) {
                warn!("could not post {}: {}", entry.url, e);
            }
        }
    }

    // Checkpoint before pruning, final save after.
    seen.save()?;
    seen.prune_all(config.history_keep);
    seen.save()?;
    Ok(())
}
