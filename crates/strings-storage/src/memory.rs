//! In-memory record store.
//!
//! Used for tests and for running the service without a database
//! (`in_memory = true`). Nothing survives a restart.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use tracing::debug;

use strings_types::AnalyzedRecord;

use crate::error::StorageError;
use crate::store::RecordStore;

#[derive(Default)]
struct MemoryState {
    next_sequence: u64,
    by_sequence: BTreeMap<u64, AnalyzedRecord>,
    sequence_of: HashMap<String, u64>,
}

/// Record store backed by process memory.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn exists(&self, identity: &str) -> Result<bool, StorageError> {
        Ok(self.state.read().sequence_of.contains_key(identity))
    }

    fn insert(&self, record: AnalyzedRecord) -> Result<AnalyzedRecord, StorageError> {
        let mut state = self.state.write();
        if state.sequence_of.contains_key(&record.identity) {
            return Err(StorageError::Conflict(record.identity));
        }

        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.sequence_of.insert(record.identity.clone(), sequence);
        state.by_sequence.insert(sequence, record.clone());

        debug!(identity = %record.identity, sequence, "Stored record in memory");
        Ok(record)
    }

    fn get_by_identity(&self, identity: &str) -> Result<Option<AnalyzedRecord>, StorageError> {
        let state = self.state.read();
        Ok(state
            .sequence_of
            .get(identity)
            .and_then(|sequence| state.by_sequence.get(sequence))
            .cloned())
    }

    fn delete_by_identity(&self, identity: &str) -> Result<bool, StorageError> {
        let mut state = self.state.write();
        match state.sequence_of.remove(identity) {
            Some(sequence) => {
                state.by_sequence.remove(&sequence);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn enumerate_all(&self) -> Result<Vec<AnalyzedRecord>, StorageError> {
        Ok(self.state.read().by_sequence.values().cloned().collect())
    }

    fn count(&self) -> Result<usize, StorageError> {
        Ok(self.state.read().by_sequence.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::contract;
    use std::sync::Arc;

    #[test]
    fn test_insert_then_get() {
        contract::insert_then_get(&MemoryStore::new());
    }

    #[test]
    fn test_duplicate_trimmed_value_conflicts() {
        contract::duplicate_trimmed_value_conflicts(&MemoryStore::new());
    }

    #[test]
    fn test_delete_removes_record() {
        contract::delete_removes_record(&MemoryStore::new());
    }

    #[test]
    fn test_enumerate_in_insertion_order() {
        contract::enumerate_in_insertion_order(&MemoryStore::new());
    }

    #[test]
    fn test_concurrent_inserts_resolve_to_one() {
        contract::concurrent_inserts_resolve_to_one(Arc::new(MemoryStore::new()));
    }
}
