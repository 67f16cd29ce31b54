//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Output flavour of the fmt subscriber.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogStyle {
    /// One JSON object per line (default; for log shippers).
    #[default]
    Json,
    /// Human-readable, for local development.
    Pretty,
}

/// Default directive when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,tower_http=debug";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(style: LogStyle) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_timer(tracing_subscriber::fmt::time::SystemTime);

    let _ = match style {
        LogStyle::Json => builder.json().with_target(false).try_init(),
        LogStyle::Pretty => builder.pretty().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init(LogStyle::Pretty);
        init(LogStyle::Json);
        ::tracing::info!("still alive after double init");
    }
}
