//! Task domain model.
//!
//! # Responsibility
//! - Define the categorized task record and its ordered collection.
//! - Own text sanitization shared by input and decode paths.
//!
//! # Invariants
//! - `id` and `text` are immutable after construction.
//! - `text` is non-empty, trimmed, and has no whitespace runs.
//! - Task ids are unique inside one `TaskCollection`.
//! - Decoding goes through the same validation as construction.

use crate::model::category::{Category, CategoryParseError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Opaque task identifier, persisted as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wraps a non-blank identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::InvalidId);
        }
        Ok(Self(value))
    }

    /// Hyphenated lowercase form of a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.hyphenated().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Domain validation errors for task input and persisted records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Text is empty after trimming and whitespace collapsing.
    EmptyText,
    /// Text is not in sanitized form.
    UnsanitizedText,
    /// Identifier is empty or blank.
    InvalidId,
    /// Category name outside the configured set.
    UnknownCategory(String),
    /// Identifier appears more than once in a collection.
    DuplicateId(TaskId),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text must not be empty"),
            Self::UnsanitizedText => {
                write!(f, "task text must be trimmed with single-space separators")
            }
            Self::InvalidId => write!(f, "task id must not be blank"),
            Self::UnknownCategory(value) => write!(f, "unknown category: `{value}`"),
            Self::DuplicateId(id) => write!(f, "duplicate task id: {id}"),
        }
    }
}

impl Error for ValidationError {}

impl From<CategoryParseError> for ValidationError {
    fn from(value: CategoryParseError) -> Self {
        Self::UnknownCategory(value.0)
    }
}

/// Trims and collapses whitespace runs into single spaces.
///
/// Returns `None` when nothing is left.
pub fn sanitize_task_text(raw: &str) -> Option<String> {
    let collapsed = WHITESPACE_RE.replace_all(raw.trim(), " ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed.into_owned())
    }
}

/// One categorized task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    id: TaskId,
    text: String,
    category: Category,
}

/// Wire shape of one persisted task; converted through `Task::new`.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskRecord {
    id: TaskId,
    text: String,
    category: Category,
}

impl TryFrom<TaskRecord> for Task {
    type Error = ValidationError;

    fn try_from(value: TaskRecord) -> Result<Self, Self::Error> {
        Task::new(value.id, value.text, value.category)
    }
}

impl Task {
    /// Creates a task from already-sanitized text.
    ///
    /// # Errors
    /// - `InvalidId` when `id` is blank.
    /// - `EmptyText` when `text` is empty.
    /// - `UnsanitizedText` when `text` differs from its sanitized form.
    pub fn new(
        id: TaskId,
        text: impl Into<String>,
        category: Category,
    ) -> Result<Self, ValidationError> {
        if id.as_str().trim().is_empty() {
            return Err(ValidationError::InvalidId);
        }
        let text = text.into();
        match sanitize_task_text(&text) {
            None => return Err(ValidationError::EmptyText),
            Some(sanitized) if sanitized != text => return Err(ValidationError::UnsanitizedText),
            Some(_) => {}
        }
        Ok(Self { id, text, category })
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub(crate) fn set_category(&mut self, category: Category) {
        self.category = category;
    }
}

/// Ordered task sequence; the unit of persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Task>", into = "Vec<Task>")]
pub struct TaskCollection {
    tasks: Vec<Task>,
}

impl TryFrom<Vec<Task>> for TaskCollection {
    type Error = ValidationError;

    fn try_from(value: Vec<Task>) -> Result<Self, Self::Error> {
        Self::from_tasks(value)
    }
}

impl From<TaskCollection> for Vec<Task> {
    fn from(value: TaskCollection) -> Self {
        value.tasks
    }
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection, rejecting duplicate ids.
    pub fn from_tasks(tasks: Vec<Task>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            if !seen.insert(task.id()) {
                return Err(ValidationError::DuplicateId(task.id().clone()));
            }
        }
        Ok(Self { tasks })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Tasks of one category, in insertion order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |task| task.category() == category)
    }

    pub(crate) fn push(&mut self, task: Task) -> Result<(), ValidationError> {
        if self.contains(task.id()) {
            return Err(ValidationError::DuplicateId(task.id().clone()));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Removes the task with `id`; returns whether one was removed.
    pub(crate) fn remove(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id() != id);
        self.tasks.len() != before
    }

    /// Overwrites the category of the task with `id`; returns whether one matched.
    pub(crate) fn set_category(&mut self, id: &TaskId, category: Category) -> bool {
        match self.tasks.iter_mut().find(|task| task.id() == id) {
            Some(task) => {
                task.set_category(category);
                true
            }
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a TaskCollection {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{sanitize_task_text, Task, TaskCollection, TaskId, ValidationError};
    use crate::model::category::Category;

    fn id(value: &str) -> TaskId {
        TaskId::new(value).expect("valid id")
    }

    #[test]
    fn sanitize_trims_and_collapses_whitespace() {
        assert_eq!(
            sanitize_task_text("  water   the \t plants\n ").as_deref(),
            Some("water the plants")
        );
        assert_eq!(sanitize_task_text(" \n\t "), None);
        assert_eq!(sanitize_task_text(""), None);
    }

    #[test]
    fn task_new_rejects_unsanitized_or_empty_text() {
        assert_eq!(
            Task::new(id("a"), "", Category::House).unwrap_err(),
            ValidationError::EmptyText
        );
        assert_eq!(
            Task::new(id("a"), " mop ", Category::House).unwrap_err(),
            ValidationError::UnsanitizedText
        );
        assert_eq!(
            Task::new(id("a"), "mop  floor", Category::House).unwrap_err(),
            ValidationError::UnsanitizedText
        );
    }

    #[test]
    fn blank_ids_are_rejected() {
        assert_eq!(TaskId::new("  ").unwrap_err(), ValidationError::InvalidId);
    }

    #[test]
    fn collection_rejects_duplicate_ids() {
        let first = Task::new(id("dup"), "mop", Category::House).unwrap();
        let second = Task::new(id("dup"), "bake", Category::Kitchen).unwrap();

        let err = TaskCollection::from_tasks(vec![first.clone(), second.clone()]).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateId(id("dup")));

        let mut collection = TaskCollection::from_tasks(vec![first]).unwrap();
        assert!(collection.push(second).is_err());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn remove_and_set_category_report_matches() {
        let mut collection = TaskCollection::from_tasks(vec![
            Task::new(id("a"), "mop", Category::House).unwrap(),
            Task::new(id("b"), "bake", Category::Kitchen).unwrap(),
        ])
        .unwrap();

        assert!(collection.set_category(&id("a"), Category::Study));
        assert!(!collection.set_category(&id("zzz"), Category::Study));
        assert_eq!(collection.get(&id("a")).unwrap().category(), Category::Study);

        assert!(collection.remove(&id("b")));
        assert!(!collection.remove(&id("b")));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn in_category_preserves_insertion_order() {
        let collection = TaskCollection::from_tasks(vec![
            Task::new(id("1"), "bake bread", Category::Kitchen).unwrap(),
            Task::new(id("2"), "mop", Category::House).unwrap(),
            Task::new(id("3"), "cook rice", Category::Kitchen).unwrap(),
        ])
        .unwrap();

        let kitchen = collection
            .in_category(Category::Kitchen)
            .map(|task| task.id().as_str())
            .collect::<Vec<_>>();
        assert_eq!(kitchen, vec!["1", "3"]);
        assert_eq!(collection.in_category(Category::Study).count(), 0);
    }
}
