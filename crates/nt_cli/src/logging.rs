use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(format: LogFormat) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    INIT.call_once(|| {
        let builder = tracing_subscriber::fmt().with_env_filter(env_filter());
        match format {
            LogFormat::Pretty => builder.init(),
            LogFormat::Json => builder.json().with_current_span(true).init(),
        }
    });
}
