//! Runtime settings and logging setup

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::constants::{DEFAULT_LOG_FILE, REQUEST_TIMEOUT_SECS};

/// Settings shared by the interactive and one-shot modes
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Upper bound for one request round trip
    pub timeout: Duration,
    /// Log destination. The terminal belongs to the UI, so logs go to a file.
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Settings {
    /// Install the global tracing subscriber. Keep the returned guard alive
    /// for as long as logs should be flushed.
    pub fn init_logging(&self) -> anyhow::Result<WorkerGuard> {
        let (dir, file_name) = split_log_path(&self.log_file)?;
        let file_appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(non_blocking)
            .with_ansi(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

        Ok(guard)
    }
}

fn split_log_path(path: &Path) -> anyhow::Result<(PathBuf, PathBuf)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("log file path '{}' has no file name", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, PathBuf::from(file_name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.log_file, PathBuf::from("hreq.log"));
    }

    #[test]
    fn test_split_log_path() {
        assert_eq!(
            split_log_path(Path::new("hreq.log")).unwrap(),
            (PathBuf::from("."), PathBuf::from("hreq.log"))
        );
        assert_eq!(
            split_log_path(Path::new("/var/log/hreq/run.log")).unwrap(),
            (PathBuf::from("/var/log/hreq"), PathBuf::from("run.log"))
        );
        assert!(split_log_path(Path::new("/")).is_err());
    }
}
