use std::time::Duration;

use tracing::{error, warn};

use crate::clock::Clock;
use crate::config::Config;
use crate::feed::FeedTransport;
use crate::poll;
use crate::registrar::ThreadRegistrar;
use crate::slack::MessageSink;

/// Drives the daemon: one registrar + poll pass per step, sleeping in
/// between. `step` returns the next pause instead of sleeping itself, so
/// interval and backoff behavior is testable without a real clock.
pub struct Scheduler<'a> {
    config: &'a Config,
    transport: &'a dyn FeedTransport,
    sink: &'a dyn MessageSink,
    clock: &'a dyn Clock,
    registrar: ThreadRegistrar,
}

impl<'a> Scheduler<'a> {
    pub fn new(
        config: &'a Config,
        transport: &'a dyn FeedTransport,
        sink: &'a dyn MessageSink,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            config,
            transport,
            sink,
            clock,
            registrar: ThreadRegistrar::new(&config.state_dir),
        }
    }

    /// Runs one iteration and returns how long to sleep before the next:
    /// the short retry backoff when no thread could be obtained, the poll
    /// interval otherwise. No failure escapes.
    pub fn step(&self) -> Duration {
        let thread_id = match self.registrar.get_or_create(self.sink, self.clock.today()) {
            Ok(id) => id,
            Err(e) => {
                warn!(
                    "could not get or create today's thread, retrying in {}s: {}",
                    self.config.retry_backoff.as_secs(),
                    e
                );
                return self.config.retry_backoff;
            }
        };

        if let Err(e) = poll::run_cycle(
            self.config,
            self.transport,
            self.sink,
            &thread_id,
            self.clock.now(),
        ) {
            error!("poll cycle failed: {}", e);
        }
        self.config.poll_interval
    }

    pub fn run_forever(&self) -> ! {
        loop {
            let pause = self.step();
            self.clock.sleep(pause);
        }
    }

    /// One registrar + poll pass with errors propagated, for the `once`
    /// subcommand.
    pub fn run_once(&self) -> anyhow::Result<()> {
        let thread_id = self
            .registrar
            .get_or_create(self.sink, self.clock.today())
            .map_err(|e| anyhow::anyhow!("could not get or create today's thread: {}", e))?;
        poll::run_cycle(
            self.config,
            self.transport,
            self.sink,
            &thread_id,
            self.clock.now(),
        )
    }
}
