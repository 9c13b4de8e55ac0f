//! Task classification and persistence core for the task sorter.
//! This crate is the single source of truth for task invariants.

pub mod classifier;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use classifier::{classify, classify_with};
pub use config::{open_task_service, CoreConfig, SqliteTaskService};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{
    categories, category_rules, parse_category, rule_for, Category, CategoryParseError,
    CategoryRule, DEFAULT_CATEGORY,
};
pub use model::task::{sanitize_task_text, Task, TaskCollection, TaskId, ValidationError};
pub use repo::blob_store::{BlobStore, MemoryBlobStore, SqliteBlobStore, StoreError, StoreResult};
pub use repo::task_store::{BlobTaskStore, TaskStore, TASKS_STORAGE_KEY};
pub use service::id_gen::{IdGenerator, UuidIdGenerator};
pub use service::task_service::{ServiceError, ServiceResult, TaskService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
