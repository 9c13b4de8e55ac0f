//! Task collection persistence over a blob store.
//!
//! # Responsibility
//! - Encode/decode the whole task collection under one fixed key.
//! - Recover from corrupt stored data without failing the caller.
//!
//! # Invariants
//! - The collection is always written whole; there are no partial updates.
//! - `load` never returns `StoreError::Corrupt`; corruption yields an empty
//!   collection and a warning event.
//! - Backend failures are propagated unchanged.

use crate::model::task::TaskCollection;
use crate::repo::blob_store::{BlobStore, StoreError, StoreResult};
use log::{debug, warn};

/// Fixed blob key holding the serialized task collection.
pub const TASKS_STORAGE_KEY: &str = "smart-task-sorter";

/// Load/save contract for the full task collection.
pub trait TaskStore {
    fn load(&self) -> StoreResult<TaskCollection>;
    fn save(&self, tasks: &TaskCollection) -> StoreResult<()>;
}

impl<S: TaskStore + ?Sized> TaskStore for &S {
    fn load(&self) -> StoreResult<TaskCollection> {
        (**self).load()
    }

    fn save(&self, tasks: &TaskCollection) -> StoreResult<()> {
        (**self).save(tasks)
    }
}

/// JSON task store backed by any `BlobStore`.
pub struct BlobTaskStore<B: BlobStore> {
    blobs: B,
}

impl<B: BlobStore> BlobTaskStore<B> {
    pub fn new(blobs: B) -> Self {
        Self { blobs }
    }

    /// Returns the underlying blob store.
    pub fn blobs(&self) -> &B {
        &self.blobs
    }
}

impl<B: BlobStore> TaskStore for BlobTaskStore<B> {
    fn load(&self) -> StoreResult<TaskCollection> {
        let Some(raw) = self.blobs.get(TASKS_STORAGE_KEY)? else {
            debug!("event=tasks_load module=store status=ok result=missing_key");
            return Ok(TaskCollection::new());
        };

        match decode_tasks(&raw) {
            Ok(tasks) => {
                debug!(
                    "event=tasks_load module=store status=ok count={}",
                    tasks.len()
                );
                Ok(tasks)
            }
            Err(err) => {
                warn!(
                    "event=tasks_load module=store status=recovered error_code=persisted_data_corrupt bytes={} error={}",
                    raw.len(),
                    err
                );
                Ok(TaskCollection::new())
            }
        }
    }

    fn save(&self, tasks: &TaskCollection) -> StoreResult<()> {
        let raw = encode_tasks(tasks)?;
        self.blobs.put(TASKS_STORAGE_KEY, &raw)?;
        debug!(
            "event=tasks_save module=store status=ok count={} bytes={}",
            tasks.len(),
            raw.len()
        );
        Ok(())
    }
}

/// Serializes a collection to its persisted JSON form.
pub fn encode_tasks(tasks: &TaskCollection) -> StoreResult<String> {
    serde_json::to_string(tasks).map_err(|err| StoreError::Encode(err.to_string()))
}

/// Strictly decodes a persisted blob.
///
/// # Errors
/// - `StoreError::Corrupt` when the blob is not a JSON array of valid,
///   uniquely identified `{id, text, category}` records. The message holds
///   position metadata only, never stored text.
pub fn decode_tasks(raw: &str) -> StoreResult<TaskCollection> {
    serde_json::from_str::<TaskCollection>(raw).map_err(|err| {
        StoreError::Corrupt(format!(
            "{:?} error at line {} column {}",
            err.classify(),
            err.line(),
            err.column()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_tasks, encode_tasks, BlobTaskStore, TaskStore, TASKS_STORAGE_KEY};
    use crate::model::category::Category;
    use crate::model::task::{Task, TaskCollection, TaskId};
    use crate::repo::blob_store::{BlobStore, MemoryBlobStore, StoreError};

    fn sample() -> TaskCollection {
        TaskCollection::from_tasks(vec![
            Task::new(TaskId::new("a").unwrap(), "mop the floor", Category::House).unwrap(),
            Task::new(TaskId::new("b").unwrap(), "read chapter 2", Category::Study).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn missing_key_loads_empty() {
        let store = BlobTaskStore::new(MemoryBlobStore::new());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn encoded_form_is_array_of_three_field_records() {
        let raw = encode_tasks(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"id": "a", "text": "mop the floor", "category": "house"},
                {"id": "b", "text": "read chapter 2", "category": "study"}
            ])
        );
    }

    #[test]
    fn decode_rejects_malformed_shapes() {
        for raw in [
            "not json",
            "{\"id\":\"a\"}",
            "[{\"id\":\"a\",\"text\":\"mop\"}]",
            "[{\"id\":\"a\",\"text\":\"mop\",\"category\":\"garage\"}]",
            "[{\"id\":\"a\",\"text\":\"  \",\"category\":\"house\"}]",
            "[{\"id\":\"a\",\"text\":\"mop\",\"category\":\"house\",\"extra\":1}]",
            "[{\"id\":\"a\",\"text\":\"mop\",\"category\":\"house\"},{\"id\":\"a\",\"text\":\"sweep\",\"category\":\"house\"}]",
        ] {
            let err = decode_tasks(raw).expect_err(raw);
            assert!(matches!(err, StoreError::Corrupt(_)), "{raw}: {err}");
        }
    }

    #[test]
    fn corrupt_message_does_not_echo_stored_text() {
        let err = decode_tasks("[{\"id\":\"a\",\"text\":\"secret plan\",\"category\":\"nope\"}]")
            .unwrap_err();
        assert!(!err.to_string().contains("secret"));
    }

    #[test]
    fn corrupt_blob_loads_empty_and_next_save_heals() {
        let store = BlobTaskStore::new(MemoryBlobStore::new());
        store.blobs().put(TASKS_STORAGE_KEY, "{{{").unwrap();

        assert!(store.load().unwrap().is_empty());

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), sample());
    }
}
