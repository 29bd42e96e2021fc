use anyhow::{Context, Result};
use mathsolver_core::{AssistantConfig, EventBus, API_KEY_ENV};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::fmt;

/// Overrides where the log file is written
const LOG_FILE_ENV: &str = "MATHSOLVER_LOG_FILE";

fn log_path() -> PathBuf {
    std::env::var_os(LOG_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("mathsolver.log"))
}

fn open_log(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // The TUI owns the terminal, so logs go to a file instead of stderr
    let log_file = open_log(&log_path())?;
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(fmt::writer::BoxMakeWriter::new(log_file))
        .init();
    info!("Starting Math & Knowledge Assistant");

    // A missing .env is fine; the key can still come from the shell or the TUI
    if let Err(e) = dotenvy::dotenv() {
        info!("No .env loaded: {}", e);
    }
    let api_key = std::env::var(API_KEY_ENV).ok();

    let config = AssistantConfig::default();
    let mut app = mathsolver_tui::App::new(config, EventBus::new(), api_key.as_deref());
    app.run().await?;

    info!("Math & Knowledge Assistant shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_log_file_is_appended_not_truncated() {
        let path = std::env::temp_dir().join(format!("mathsolver-cli-test-{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        writeln!(open_log(&path).unwrap(), "first run").unwrap();
        writeln!(open_log(&path).unwrap(), "second run").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first run\nsecond run\n");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_log_file_defaults_to_temp_dir() {
        if std::env::var_os(LOG_FILE_ENV).is_none() {
            assert_eq!(log_path(), std::env::temp_dir().join("mathsolver.log"));
        }
    }

    #[test]
    fn test_unwritable_log_path_is_reported() {
        let path = std::env::temp_dir().join("mathsolver-missing-dir").join("nested").join("x.log");
        let err = open_log(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to open log file"));
    }
}
