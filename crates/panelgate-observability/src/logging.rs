use std::env;
use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "panelgate.json";

/// Logging configuration.
///
/// - `LOG_LEVEL`: level for the panel's own crates (default: `info`)
/// - `LOG_DIR`: directory for the daily JSON log; unset disables file logging
///
/// `RUST_LOG`, when set, overrides the console filter entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub log_dir: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_dir: env::var("LOG_DIR")
                .ok()
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    fn directives(&self) -> String {
        format!(
            "panelgate={level},panelgate_access={level},panelgate_cache={level},\
             panelgate_observability={level},tower_http=warn,hyper=warn,sqlx=warn",
            level = self.level
        )
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}

/// Installs the global subscriber.
///
/// Returns the file writer guard when file logging is on; keep it alive for
/// the life of the process or buffered lines are lost.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directives()));

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let (json_layer, guard) = match config.log_dir.as_ref().map(|dir| (dir, fs::create_dir_all(dir))) {
        Some((dir, Ok(()))) => {
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_current_span(true)
                .with_filter(EnvFilter::new(config.directives()));
            (Some(layer), Some(guard))
        }
        Some((dir, Err(e))) => {
            eprintln!(
                "Failed to create log directory {}: {}. Logging to console only",
                dir.display(),
                e
            );
            (None, None)
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(json_layer)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_use_level() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            log_dir: None,
        };
        let directives = config.directives();
        assert!(directives.starts_with("panelgate=debug,"));
        assert!(directives.contains("panelgate_access=debug"));
        assert!(directives.ends_with("sqlx=warn"));
    }

    #[test]
    fn test_default_has_no_file_output() {
        assert_eq!(LoggingConfig::default().log_dir, None);
    }
}
