//! Logging Infrastructure
//!
//! `tracing` with an `EnvFilter` front end. Console output by default;
//! when a log directory is given, output goes to a daily-rolling file
//! instead. The `http_access` and `security` targets ride the same
//! subscriber and can be raised or silenced through `RUST_LOG`.

use std::time::{Duration, SystemTime};

use tracing_subscriber::EnvFilter;

/// Rolling file prefix; the appender adds the date suffix.
const LOG_FILE_PREFIX: &str = "waffle-server.log";

/// Initialize console-only logging at the default level
pub fn init_logger() {
    init_logger_with_file(None, None, None);
}

/// Initialize logging with optional JSON formatting and file output
///
/// `RUST_LOG` wins over `log_level` when set. A `log_dir` that cannot
/// be created falls back to console output.
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or("info")));
    let json = json.unwrap_or(false);

    if let Some(dir) = log_dir
        && std::fs::create_dir_all(dir).is_ok()
    {
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        if json {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(appender)
                .with_ansi(false)
                .json()
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(appender)
                .with_ansi(false)
                .init();
        }
        return;
    }

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Delete rotated log files older than `days`
///
/// Only files carrying the rolling prefix are considered; anything else
/// in the directory is left untouched.
pub fn cleanup_old_logs(log_dir: &str, days: u64) -> std::io::Result<()> {
    let max_age = Duration::from_secs(days.saturating_mul(24 * 60 * 60));

    for entry in std::fs::read_dir(log_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !name.starts_with(LOG_FILE_PREFIX) {
            continue;
        }
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        if let Ok(modified) = metadata.modified()
            && age_of(modified) > max_age
        {
            if let Err(e) = std::fs::remove_file(entry.path()) {
                tracing::warn!("Failed to remove old log file {}: {}", name, e);
            }
        }
    }

    Ok(())
}

fn age_of(modified: SystemTime) -> Duration {
    SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_cleanup_skips_unrelated_files() {
        let dir = tempfile::tempdir().unwrap();
        let kept = dir.path().join("app.db");
        File::create(&kept).unwrap();

        cleanup_old_logs(dir.path().to_str().unwrap(), 0).unwrap();
        assert!(kept.exists());
    }

    #[test]
    fn test_cleanup_removes_expired_logs() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join(format!("{}.2024-01-01", LOG_FILE_PREFIX));
        File::create(&log).unwrap();

        // Zero-day retention expires everything written before now
        std::thread::sleep(Duration::from_millis(10));
        cleanup_old_logs(dir.path().to_str().unwrap(), 0).unwrap();
        assert!(!log.exists());
    }
}
