//! Runtime settings resolved from flags, environment and platform defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use honeypad_core::{
    default_log_level, AsciiCollator, FoldingCollator, LoggingConfig, StoreOptions,
};

use crate::cli::{Cli, CollationChoice};
use crate::error::CliError;

const APP_DIR_NAME: &str = "honeypad";
const DB_FILE_NAME: &str = "notes.sqlite3";

#[derive(Debug)]
pub struct Settings {
    pub db_path: PathBuf,
    pub logging: LoggingConfig,
    pub store: StoreOptions,
}

impl Settings {
    pub fn resolve(cli: &Cli) -> Result<Self, CliError> {
        let db_path = match &cli.db_path {
            Some(path) => path.clone(),
            None => default_db_path(dirs::data_dir().as_deref())?,
        };

        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        let logging = match &cli.log_dir {
            Some(dir) => LoggingConfig::directory(level, dir),
            None => LoggingConfig::stderr(level),
        };

        let mut store = match cli.collation {
            CollationChoice::Folding => StoreOptions::default().with_collator(FoldingCollator),
            CollationChoice::Ascii => StoreOptions::default().with_collator(AsciiCollator),
        };
        if let Some(millis) = cli.busy_timeout_ms {
            store = store.with_busy_timeout(Duration::from_millis(millis));
        }

        Ok(Self {
            db_path,
            logging,
            store,
        })
    }
}

fn default_db_path(data_dir: Option<&Path>) -> Result<PathBuf, CliError> {
    let data_dir = data_dir.ok_or(CliError::NoDataDir)?;
    Ok(data_dir.join(APP_DIR_NAME).join(DB_FILE_NAME))
}

/// Creates the parent directory of the database file if needed.
pub fn ensure_parent_dir(db_path: &Path) -> Result<(), CliError> {
    if let Some(parent) = db_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{default_db_path, ensure_parent_dir, Settings};
    use crate::cli::Cli;
    use crate::error::CliError;
    use clap::Parser;
    use honeypad_core::LogTarget;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    #[test]
    fn default_db_path_lives_under_app_dir() {
        let path = default_db_path(Some(Path::new("/data"))).unwrap();
        assert_eq!(path, PathBuf::from("/data/honeypad/notes.sqlite3"));
        assert!(matches!(default_db_path(None), Err(CliError::NoDataDir)));
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "honeypad",
            "--db-path",
            "/tmp/custom.sqlite3",
            "--log-level",
            "warn",
            "--log-dir",
            "/tmp/honeypad-logs",
            "--busy-timeout-ms",
            "1500",
            "list",
        ]);
        let settings = Settings::resolve(&cli).unwrap();
        assert_eq!(settings.db_path, PathBuf::from("/tmp/custom.sqlite3"));
        assert_eq!(settings.logging.level, "warn");
        assert_eq!(
            settings.logging.target,
            LogTarget::Directory(PathBuf::from("/tmp/honeypad-logs"))
        );
        assert_eq!(settings.store.busy_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn ensure_parent_dir_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("notes.sqlite3");
        ensure_parent_dir(&db_path).unwrap();
        assert!(db_path.parent().unwrap().is_dir());
        ensure_parent_dir(Path::new("notes.sqlite3")).unwrap();
    }
}
