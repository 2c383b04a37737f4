use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `RECALL_LOG=debug`.
pub const LOG_ENV: &str = "RECALL_LOG";
const DEFAULT_FILTER: &str = "info";

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn file_subscriber(file: File, filter: EnvFilter) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .finish()
}

fn open_log(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Sends all tracing output to `path`. The terminal belongs to the UI, so
/// nothing is ever logged to stdout or stderr.
pub fn init(path: &Path) -> io::Result<()> {
    let subscriber = file_subscriber(open_log(path)?, filter_from_env());
    tracing::subscriber::set_global_default(subscriber).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn events_land_in_the_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("recall.log");
        let subscriber = file_subscriber(open_log(&path).unwrap(), EnvFilter::new("debug"));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(level = 3, "game over");
            tracing::trace!("filtered out");
        });

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("game over"));
        assert!(contents.contains("level=3"));
        assert!(!contents.contains("filtered out"));
    }

    #[test]
    fn reopening_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("recall.log");
        fs::write(&path, "earlier run\n").unwrap();

        let subscriber = file_subscriber(open_log(&path).unwrap(), EnvFilter::new("info"));
        tracing::subscriber::with_default(subscriber, || tracing::warn!("later run"));

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("earlier run\n"));
        assert!(contents.contains("later run"));
    }
}
