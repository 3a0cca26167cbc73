//! RocksDB-backed record store.
//!
//! Provides:
//! - Database open/close with column family setup
//! - Atomic insert/delete of a record and its insertion-order entry
//! - Identity uniqueness under concurrent writers
//! - Snapshot reads for enumeration

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use rocksdb::{ColumnFamily, IteratorMode, Options, WriteBatch, DB};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use strings_types::AnalyzedRecord;

use crate::column_families::{build_cf_descriptors, ALL_CF_NAMES, CF_RECORDS, CF_SEQUENCE};
use crate::error::StorageError;
use crate::keys::{RecordKey, SequenceKey};
use crate::store::RecordStore;

/// Value stored under a record key.
#[derive(Debug, Serialize, Deserialize)]
struct StoredRecord {
    sequence: u64,
    record: AnalyzedRecord,
}

/// RocksDB record store
pub struct Storage {
    db: DB,
    /// Insertion sequence counter
    sequence: AtomicU64,
    /// Live record count, loaded once at open and kept under `write_lock`
    record_count: AtomicU64,
    /// Serializes check-then-write on insert and delete
    write_lock: Mutex<()>,
}

impl Storage {
    /// Open storage at the given path, creating if necessary
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        info!("Opening storage at {:?}", path);

        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);
        db_opts.set_max_background_jobs(4);

        let cf_descriptors = build_cf_descriptors();
        let db = DB::open_cf_descriptors(&db_opts, path, cf_descriptors)?;

        let sequence = Self::load_sequence(&db)?;
        let record_count = Self::load_record_count(&db)?;
        debug!(next_sequence = sequence, record_count, "Storage opened");

        Ok(Self {
            db,
            sequence: AtomicU64::new(sequence),
            record_count: AtomicU64::new(record_count),
            write_lock: Mutex::new(()),
        })
    }

    /// Load the next sequence number from the highest existing key
    fn load_sequence(db: &DB) -> Result<u64, StorageError> {
        let cf = db
            .cf_handle(CF_SEQUENCE)
            .ok_or_else(|| StorageError::ColumnFamilyNotFound(CF_SEQUENCE.to_string()))?;

        let mut iter = db.iterator_cf(cf, IteratorMode::End);
        if let Some(result) = iter.next() {
            let (key, _) = result?;
            let sequence_key = SequenceKey::from_bytes(&key)?;
            return Ok(sequence_key.sequence + 1);
        }
        Ok(0)
    }

    /// Count records with a single scan of the records column family
    fn load_record_count(db: &DB) -> Result<u64, StorageError> {
        let cf = db
            .cf_handle(CF_RECORDS)
            .ok_or_else(|| StorageError::ColumnFamilyNotFound(CF_RECORDS.to_string()))?;

        let mut count = 0u64;
        for item in db.iterator_cf(cf, IteratorMode::Start) {
            item?;
            count += 1;
        }
        Ok(count)
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst)
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily, StorageError> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StorageError::ColumnFamilyNotFound(name.to_string()))
    }

    fn get_stored(&self, identity: &str) -> Result<Option<StoredRecord>, StorageError> {
        let records_cf = self.cf(CF_RECORDS)?;
        match self.db.get_cf(records_cf, RecordKey::new(identity).to_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Flush all column families to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        for cf_name in ALL_CF_NAMES {
            if let Some(cf) = self.db.cf_handle(cf_name) {
                self.db.flush_cf(cf)?;
            }
        }
        Ok(())
    }

    // ===== Admin Operations =====

    /// Trigger manual compaction on all column families.
    pub fn compact(&self) -> Result<(), StorageError> {
        info!("Starting full compaction...");
        for cf_name in ALL_CF_NAMES {
            if let Some(cf) = self.db.cf_handle(cf_name) {
                self.db.compact_range_cf::<&[u8], &[u8]>(cf, None, None);
            }
        }
        info!("Compaction complete");
        Ok(())
    }

    /// Get database statistics.
    pub fn get_stats(&self) -> Result<StorageStats, StorageError> {
        Ok(StorageStats {
            record_count: self.record_count.load(Ordering::SeqCst),
            disk_usage_bytes: self.get_disk_usage(),
        })
    }

    fn get_disk_usage(&self) -> u64 {
        let mut total_size = 0u64;
        if let Ok(entries) = std::fs::read_dir(self.db.path()) {
            for entry in entries.flatten() {
                if let Ok(metadata) = entry.metadata() {
                    total_size += metadata.len();
                }
            }
        }
        total_size
    }
}

impl RecordStore for Storage {
    fn exists(&self, identity: &str) -> Result<bool, StorageError> {
        let records_cf = self.cf(CF_RECORDS)?;
        Ok(self
            .db
            .get_pinned_cf(records_cf, RecordKey::new(identity).to_bytes())?
            .is_some())
    }

    fn insert(&self, record: AnalyzedRecord) -> Result<AnalyzedRecord, StorageError> {
        let records_cf = self.cf(CF_RECORDS)?;
        let sequence_cf = self.cf(CF_SEQUENCE)?;
        let record_key = RecordKey::new(record.identity.as_str());

        let _guard = self.write_lock.lock();

        if self.db.get_pinned_cf(records_cf, record_key.to_bytes())?.is_some() {
            debug!(identity = %record.identity, "Record already exists");
            return Err(StorageError::Conflict(record.identity));
        }

        let sequence_key = SequenceKey::new(self.next_sequence());
        let stored = StoredRecord {
            sequence: sequence_key.sequence,
            record,
        };
        let bytes = serde_json::to_vec(&stored)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(records_cf, record_key.to_bytes(), bytes);
        batch.put_cf(
            sequence_cf,
            sequence_key.to_bytes(),
            stored.record.identity.as_bytes(),
        );
        self.db.write(batch)?;
        self.record_count.fetch_add(1, Ordering::SeqCst);

        debug!(
            identity = %stored.record.identity,
            sequence = stored.sequence,
            "Stored record"
        );
        Ok(stored.record)
    }

    fn get_by_identity(&self, identity: &str) -> Result<Option<AnalyzedRecord>, StorageError> {
        Ok(self.get_stored(identity)?.map(|stored| stored.record))
    }

    fn delete_by_identity(&self, identity: &str) -> Result<bool, StorageError> {
        let records_cf = self.cf(CF_RECORDS)?;
        let sequence_cf = self.cf(CF_SEQUENCE)?;

        let _guard = self.write_lock.lock();

        let Some(stored) = self.get_stored(identity)? else {
            return Ok(false);
        };

        let mut batch = WriteBatch::default();
        batch.delete_cf(records_cf, RecordKey::new(identity).to_bytes());
        batch.delete_cf(sequence_cf, SequenceKey::new(stored.sequence).to_bytes());
        self.db.write(batch)?;
        self.record_count.fetch_sub(1, Ordering::SeqCst);

        debug!(identity = %identity, sequence = stored.sequence, "Deleted record");
        Ok(true)
    }

    fn enumerate_all(&self) -> Result<Vec<AnalyzedRecord>, StorageError> {
        let records_cf = self.cf(CF_RECORDS)?;
        let sequence_cf = self.cf(CF_SEQUENCE)?;
        let snapshot = self.db.snapshot();

        let mut records = Vec::new();
        for item in snapshot.iterator_cf(sequence_cf, IteratorMode::Start) {
            let (key, identity) = item?;
            let record_key = RecordKey {
                identity: String::from_utf8_lossy(&identity).into_owned(),
            };

            match snapshot.get_cf(records_cf, record_key.to_bytes())? {
                Some(bytes) => {
                    let stored: StoredRecord = serde_json::from_slice(&bytes)?;
                    records.push(stored.record);
                }
                None => {
                    let sequence = SequenceKey::from_bytes(&key)?.sequence;
                    warn!(
                        identity = %record_key.identity,
                        sequence,
                        "Sequence entry without record, skipping"
                    );
                }
            }
        }

        Ok(records)
    }

    fn count(&self) -> Result<usize, StorageError> {
        Ok(self.record_count.load(Ordering::SeqCst) as usize)
    }
}

/// Statistics about the storage.
#[derive(Debug, Default)]
pub struct StorageStats {
    /// Number of records stored
    pub record_count: u64,
    /// Total disk usage in bytes
    pub disk_usage_bytes: u64,
}
