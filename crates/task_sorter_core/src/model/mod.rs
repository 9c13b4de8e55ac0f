//! Domain model for categorized tasks.
//!
//! # Responsibility
//! - Define the task record, its collection, and the fixed category set.
//! - Keep category rules as static data rather than per-task state.
//!
//! # Invariants
//! - No task can exist without a category from the configured set.
//! - Category priority is an explicit ordered list, never map iteration order.

pub mod category;
pub mod task;
