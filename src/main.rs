mod clock;
mod config;
mod dedup;
mod error;
mod feed;
mod http;
mod poll;
mod registrar;
mod scheduler;
mod slack;
mod store;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use clock::SystemClock;
use config::Config;
use feed::HttpTransport;
use scheduler::Scheduler;
use slack::SlackSink;

/// Polls RSS/Atom feeds and posts new entries into a daily Slack thread
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Feed URL to poll (repeat for multiple feeds)
    #[arg(long = "feed", value_name = "URL", required = true)]
    feeds: Vec<String>,

    /// Directory holding the bot's persisted state
    #[arg(long, env = "FEEDRELAY_STATE", default_value = ".")]
    state_dir: PathBuf,

    /// Slack bot token
    #[arg(long, env = "SLACK_BOT_TOKEN", hide_env_values = true)]
    token: String,

    /// Channel that receives the daily thread
    #[arg(long, env = "SLACK_CHANNEL_ID")]
    channel: String,

    /// Slack API root, overridable for testing
    #[arg(long, env = "SLACK_API_BASE", default_value = "https://slack.com/api", hide = true)]
    api_base: String,

    /// Maximum entry age, in hours, to still be posted
    #[arg(long, default_value_t = 72)]
    recency_hours: i64,

    /// Entries posted per feed per cycle
    #[arg(long, default_value_t = 30)]
    max_posts: usize,

    /// Fingerprints kept per feed in the dedup history
    #[arg(long, default_value_t = 200)]
    history: usize,

    /// Seconds between poll cycles
    #[arg(long, default_value_t = 3600)]
    interval: u64,

    /// Seconds before retrying a failed thread creation
    #[arg(long, default_value_t = 30)]
    backoff: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Poll forever at the configured interval (the default)
    Run,
    /// Run a single poll cycle and exit
    Once,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let config = Config {
        feeds: args.feeds,
        state_dir: args.state_dir,
        recency_window: chrono::Duration::hours(args.recency_hours),
        max_posts_per_feed: args.max_posts,
        history_keep: args.history,
        poll_interval: Duration::from_secs(args.interval),
        retry_backoff: Duration::from_secs(args.backoff),
    };

    let transport = HttpTransport::new()?;
    let sink = SlackSink::new(&args.api_base, &args.token, &args.channel)?;
    let clock = SystemClock;
    let scheduler = Scheduler::new(&config, &transport, &sink, &clock);

    match args.command {
        Some(Command::Once) => scheduler.run_once(),
        Some(Command::Run) | None => {
            info!(
                "starting feedrelay: {} feed(s), polling every {}s",
                config.feeds.len(),
                config.poll_interval.as_secs()
            );
            scheduler.run_forever()
        }
    }
}
