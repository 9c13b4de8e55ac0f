//! Host-facing configuration and service wiring.
//!
//! # Responsibility
//! - Resolve database path and logging settings from the environment.
//! - Build a production `TaskService` over a SQLite connection.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never fails; invalid logging values surface at `init_logging`.

use crate::logging::{default_log_level, init_logging};
use crate::repo::blob_store::SqliteBlobStore;
use crate::repo::task_store::BlobTaskStore;
use crate::service::id_gen::UuidIdGenerator;
use crate::service::task_service::TaskService;
use rusqlite::Connection;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "TASK_SORTER_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "TASK_SORTER_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "TASK_SORTER_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "task_sorter.sqlite3";

/// Production service type over a borrowed SQLite connection.
pub type SqliteTaskService<'conn> =
    TaskService<BlobTaskStore<SqliteBlobStore<'conn>>, UuidIdGenerator>;

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file holding the task blob.
    pub db_path: PathBuf,
    /// Log level passed to `init_logging`.
    pub log_level: String,
    /// Log directory; file logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads `TASK_SORTER_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: read(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            log_level: read(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns `Ok(false)` when logging is not configured.
    pub fn init_logging(&self) -> Result<bool, String> {
        let Some(log_dir) = &self.log_dir else {
            return Ok(false);
        };
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log_dir is not valid UTF-8: `{}`", log_dir.display()))?;
        init_logging(&self.log_level, log_dir)?;
        Ok(true)
    }
}

/// Builds the production service over an opened, migrated connection.
pub fn open_task_service(conn: &Connection) -> SqliteTaskService<'_> {
    TaskService::new(
        BlobTaskStore::new(SqliteBlobStore::new(conn)),
        UuidIdGenerator,
    )
}
