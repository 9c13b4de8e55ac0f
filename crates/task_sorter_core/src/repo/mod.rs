//! Persistence layer for the task collection.
//!
//! # Responsibility
//! - Define the blob and task store contracts.
//! - Isolate SQLite and JSON encoding details from the service layer.
//!
//! # Invariants
//! - The task collection is persisted as one value under one key.
//! - Corrupt persisted data is recovered at load time, never surfaced.

pub mod blob_store;
pub mod task_store;
