use std::path::Path;
use tracing::Level;
use tracing_appender::rolling;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Events with this target go to the log file only, for messages the caller
/// already prints to the terminal itself.
pub const FILE_ONLY: &str = "clipsnip::file_only";

/// Initialize logging to `<log_dir>/clipsnip.log` plus warnings on stderr.
/// Returns a guard that must be held for the lifetime of the application
/// to ensure log messages are flushed.
pub fn init_logging(
    log_dir: &Path,
) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = rolling::never(log_dir, "clipsnip.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr.with_max_level(Level::WARN))
                .with_target(false)
                .with_filter(filter_fn(|meta| shown_on_terminal(meta.target()))),
        )
        .try_init()?;

    Ok(guard)
}

fn shown_on_terminal(target: &str) -> bool {
    target != FILE_ONLY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_only_target_skips_terminal() {
        assert!(!shown_on_terminal(FILE_ONLY));
        assert!(shown_on_terminal("clipsnip_core::store_dir"));
    }

    #[test]
    fn test_file_only_events_reach_log_file() {
        let tmp = tempfile::tempdir().unwrap();
        let guard = init_logging(tmp.path()).unwrap();
        tracing::error!(target: FILE_ONLY, "store write failed");
        drop(guard);

        let log = std::fs::read_to_string(tmp.path().join("clipsnip.log")).unwrap();
        assert!(log.contains("store write failed"));
    }
}
