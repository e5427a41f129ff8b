use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

const FALLBACK_LEVEL: &str = "info";

/// Builds the filter for `level`. An unparsable filter falls back to `info`
/// and comes back with a warning for the caller to report.
fn build_filter(level: &str) -> (EnvFilter, Option<String>) {
    match EnvFilter::try_new(level) {
        Ok(filter) => (filter, None),
        Err(err) => (
            EnvFilter::new(FALLBACK_LEVEL),
            Some(format!("Invalid log level {:?} ({}), using {:?}", level, err, FALLBACK_LEVEL)),
        ),
    }
}

fn init_subscriber(level: &str) {
    let (filter, warning) = build_filter(level);

    if let Some(warning) = warning {
        eprintln!("{}", warning);
    }

    // stdout carries command output, so logs go to stderr
    let result = Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
        )
        .try_init();

    if let Err(err) = result {
        eprintln!("Failed to initialize logging: {}", err);
    }
}

pub fn init(level: &str) {
    static INITIALIZED: OnceLock<()> = OnceLock::new();

    INITIALIZED.get_or_init(|| init_subscriber(level));
}
