//! Tracing subscriber setup for binaries embedding the tracker.

use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

static INIT: OnceLock<()> = OnceLock::new();

/// Installs a formatting subscriber filtered by `RUST_LOG`.
///
/// Safe to call multiple times - only the first call has effect. Tracker
/// events at `info` and above are always shown.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
            .add_directive(default_directive("ibf_requirements=info"))
            .add_directive(default_directive("ibf=info"));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init();
    });
}

fn default_directive(directive: &str) -> tracing_subscriber::filter::Directive {
    match directive.parse() {
        Ok(parsed) => parsed,
        Err(err) => panic!("invalid built-in directive {}: {}", directive, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        tracing::info!(event = "logging_ready");
    }
}
