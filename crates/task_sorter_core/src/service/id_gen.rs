//! Task identifier generation.
//!
//! # Invariants
//! - Generators never return blank ids.
//! - Uniqueness against stored tasks is checked by the service, not here.

use crate::model::task::TaskId;
use uuid::Uuid;

/// Capability producing fresh task ids.
pub trait IdGenerator {
    fn next_id(&self) -> TaskId;
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn next_id(&self) -> TaskId {
        (**self).next_id()
    }
}

/// Random UUID v4 ids in hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> TaskId {
        TaskId::from_uuid(Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::{IdGenerator, UuidIdGenerator};
    use uuid::Uuid;

    #[test]
    fn uuid_ids_are_distinct_and_parseable() {
        let first = UuidIdGenerator.next_id();
        let second = UuidIdGenerator.next_id();
        assert_ne!(first, second);
        assert!(Uuid::parse_str(first.as_str()).is_ok());
    }
}
