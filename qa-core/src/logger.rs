//! Tracing initialization: console and (optionally) a log file share the same fmt layer format
//! (level, target, span events, all fields).

use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::FmtSpan, fmt::writer::MakeWriterExt, layer::SubscriberExt,
    util::SubscriberInitExt, EnvFilter, Registry,
};

/// Installs the global tracing subscriber.
///
/// The level is read from `RUST_LOG` (e.g. `info`, `debug`, `qa_cache=trace`); `info` when unset.
/// Load `.env` (`dotenvy::dotenv()`) before calling this or `RUST_LOG` from it is not seen.
/// When `log_file_path` is given, output is tee'd to stdout and the file (opened in append mode).
pub fn init_tracing(log_file_path: Option<&str>) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = Registry::default().with(env_filter);

    match log_file_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let file = Arc::new(file);
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stdout.and(file))
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true)
                .with_level(true)
                .with_file(false)
                .with_line_number(false);
            registry.with(fmt_layer).try_init()
        }
        None => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stdout)
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true)
                .with_level(true);
            registry.with(fmt_layer).try_init()
        }
    }
    .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}
