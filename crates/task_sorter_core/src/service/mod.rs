//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate classifier and store calls into UI-facing operations.
//! - Keep callers decoupled from storage details.

pub mod id_gen;
pub mod task_service;
