//! Task use-case service.
//!
//! # Responsibility
//! - Provide add/remove/reclassify entry points for UI callers.
//! - Own the load-mutate-save cycle around `TaskStore`.
//!
//! # Invariants
//! - Every call reloads from the store; nothing is cached between calls.
//! - Every successful call saves the whole collection and returns an owned
//!   snapshot of the post-mutation state.
//! - Validation failures return before any store access.
//! - Absent ids on remove/reclassify are no-ops, not errors.
//! - Only `add` consults the classifier.

use crate::classifier::classify;
use crate::model::category::{parse_category, Category};
use crate::model::task::{sanitize_task_text, Task, TaskCollection, TaskId, ValidationError};
use crate::repo::blob_store::StoreError;
use crate::repo::task_store::TaskStore;
use crate::service::id_gen::IdGenerator;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for task use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller input was rejected; nothing was mutated.
    Validation(ValidationError),
    /// Store backend failure.
    Store(StoreError),
    /// Id generator returned an id already present in the collection.
    IdCollision(TaskId),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::IdCollision(id) => write!(f, "generated task id already exists: {id}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::IdCollision(_) => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Task service over an injected store and id generator.
pub struct TaskService<S: TaskStore, G: IdGenerator> {
    store: S,
    ids: G,
}

impl<S: TaskStore, G: IdGenerator> TaskService<S, G> {
    pub fn new(store: S, ids: G) -> Self {
        Self { store, ids }
    }

    /// Returns the stored collection, e.g. for the initial render.
    pub fn list(&self) -> ServiceResult<TaskCollection> {
        Ok(self.store.load()?)
    }

    /// Sanitizes, classifies and appends a new task.
    ///
    /// # Errors
    /// - `Validation(EmptyText)` when nothing is left after sanitizing.
    /// - `IdCollision` when the generator repeats a stored id.
    /// - `Store` on backend failure.
    pub fn add(&self, raw_text: &str) -> ServiceResult<TaskCollection> {
        let Some(text) = sanitize_task_text(raw_text) else {
            info!("event=task_add module=service status=rejected error_code=empty_text");
            return Err(ValidationError::EmptyText.into());
        };

        let category = classify(&text);
        let mut tasks = self.store.load()?;
        let id = self.ids.next_id();
        if tasks.contains(&id) {
            warn!("event=task_add module=service status=error error_code=id_collision task_id={id}");
            return Err(ServiceError::IdCollision(id));
        }

        tasks.push(Task::new(id.clone(), text, category)?)?;
        self.store.save(&tasks)?;
        info!(
            "event=task_add module=service status=ok task_id={} category={} count={}",
            id,
            category,
            tasks.len()
        );
        Ok(tasks)
    }

    /// Removes the task with `id` when present.
    pub fn remove(&self, id: &TaskId) -> ServiceResult<TaskCollection> {
        let mut tasks = self.store.load()?;
        let removed = tasks.remove(id);
        self.store.save(&tasks)?;
        info!(
            "event=task_remove module=service status=ok task_id={} removed={} count={}",
            id,
            removed,
            tasks.len()
        );
        Ok(tasks)
    }

    /// Overwrites the category of the task with `id` when present.
    ///
    /// Manual override: the classifier is not consulted.
    pub fn reclassify(&self, id: &TaskId, category: Category) -> ServiceResult<TaskCollection> {
        let mut tasks = self.store.load()?;
        let matched = tasks.set_category(id, category);
        self.store.save(&tasks)?;
        info!(
            "event=task_reclassify module=service status=ok task_id={} category={} matched={}",
            id, category, matched
        );
        Ok(tasks)
    }

    /// Like `reclassify`, taking the category by its string id.
    ///
    /// # Errors
    /// - `Validation(UnknownCategory)` for names outside the category set;
    ///   the store is not touched.
    pub fn reclassify_named(
        &self,
        id: &TaskId,
        category_name: &str,
    ) -> ServiceResult<TaskCollection> {
        let category = parse_category(category_name).map_err(|err| {
            info!(
                "event=task_reclassify module=service status=rejected error_code=unknown_category task_id={id}"
            );
            ValidationError::from(err)
        })?;
        self.reclassify(id, category)
    }
}
