//! Tracing bootstrap and the log-backed achievement sink.

use tracing::debug;
use tracing_subscriber::EnvFilter;

use wordstrike_core::events::AchievementEvent;
use wordstrike_sim::achievements::AchievementSink;

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
/// Calling this more than once is harmless.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Writes achievement notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl AchievementSink for LogSink {
    fn notify(&mut self, event: AchievementEvent) {
        debug!(?event, "achievement progress");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
        tracing::info!("still logging");
    }
}
