//! The record store contract.

use strings_types::AnalyzedRecord;

use crate::error::StorageError;

/// Keyed storage for analyzed records.
///
/// The store is the authority on identity uniqueness: when two callers
/// insert the same identity concurrently, exactly one insert succeeds and
/// the other gets `StorageError::Conflict`. Enumeration returns records in
/// insertion order.
pub trait RecordStore: Send + Sync {
    /// Whether a record with this identity is stored.
    fn exists(&self, identity: &str) -> Result<bool, StorageError>;

    /// Store a new record. Fails with `Conflict` if the identity is taken.
    fn insert(&self, record: AnalyzedRecord) -> Result<AnalyzedRecord, StorageError>;

    fn get_by_identity(&self, identity: &str) -> Result<Option<AnalyzedRecord>, StorageError>;

    /// Remove a record. Returns false if nothing was stored under this identity.
    fn delete_by_identity(&self, identity: &str) -> Result<bool, StorageError>;

    /// All records, oldest first.
    fn enumerate_all(&self) -> Result<Vec<AnalyzedRecord>, StorageError>;

    /// Number of stored records.
    fn count(&self) -> Result<usize, StorageError> {
        Ok(self.enumerate_all()?.len())
    }
}

#[cfg(test)]
pub(crate) mod contract {
    //! Behaviour every `RecordStore` implementation must share.

    use std::sync::Arc;
    use std::thread;

    use strings_types::AnalyzedRecord;

    use super::RecordStore;
    use crate::error::StorageError;

    pub fn record(text: &str) -> AnalyzedRecord {
        let analysis = strings_analyzer::analyze(text);
        AnalyzedRecord::new(analysis.identity, text.to_string(), analysis.properties)
    }

    pub fn insert_then_get(store: &dyn RecordStore) {
        let stored = store.insert(record("  hello world ")).unwrap();
        assert!(store.exists(&stored.identity).unwrap());

        let fetched = store.get_by_identity(&stored.identity).unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(fetched.original_value, "  hello world ");
    }

    pub fn duplicate_trimmed_value_conflicts(store: &dyn RecordStore) {
        store.insert(record("abc")).unwrap();
        let err = store.insert(record("  abc\t")).unwrap_err();

        assert!(matches!(err, StorageError::Conflict(_)));
        assert_eq!(store.count().unwrap(), 1);
        let kept = store
            .get_by_identity(&strings_analyzer::identity_of("abc"))
            .unwrap()
            .unwrap();
        assert_eq!(kept.original_value, "abc");
    }

    pub fn delete_removes_record(store: &dyn RecordStore) {
        let stored = store.insert(record("gone soon")).unwrap();

        assert!(store.delete_by_identity(&stored.identity).unwrap());
        assert!(!store.exists(&stored.identity).unwrap());
        assert!(store.get_by_identity(&stored.identity).unwrap().is_none());
        assert!(!store.delete_by_identity(&stored.identity).unwrap());
        assert!(store.enumerate_all().unwrap().is_empty());
    }

    pub fn enumerate_in_insertion_order(store: &dyn RecordStore) {
        for text in ["zulu", "alpha", "mike", "bravo"] {
            store.insert(record(text)).unwrap();
        }
        store
            .delete_by_identity(&strings_analyzer::identity_of("mike"))
            .unwrap();
        store.insert(record("mike")).unwrap();

        let values: Vec<String> = store
            .enumerate_all()
            .unwrap()
            .into_iter()
            .map(|r| r.original_value)
            .collect();
        assert_eq!(values, vec!["zulu", "alpha", "bravo", "mike"]);
        assert_eq!(store.count().unwrap(), 4);
    }

    pub fn concurrent_inserts_resolve_to_one(store: Arc<dyn RecordStore>) {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                // Same trimmed value, different padding
                let text = format!("{}racecar", " ".repeat(i));
                thread::spawn(move || store.insert(record(&text)).is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store.count().unwrap(), 1);
    }
}
