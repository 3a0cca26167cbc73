//! Column family definitions for RocksDB.
//!
//! - records: Analyzed records keyed by identity
//! - sequence: Insertion-order index (sequence number -> identity)

use rocksdb::{ColumnFamilyDescriptor, Options};

/// Column family name for analyzed records
pub const CF_RECORDS: &str = "records";

/// Column family name for the insertion-order index
pub const CF_SEQUENCE: &str = "sequence";

/// All column family names
pub const ALL_CF_NAMES: &[&str] = &[CF_RECORDS, CF_SEQUENCE];

/// Create column family options for records (write-once, compressed)
fn records_options() -> Options {
    let mut opts = Options::default();
    opts.set_compression_type(rocksdb::DBCompressionType::Zstd);
    opts
}

/// Build all column family descriptors
pub fn build_cf_descriptors() -> Vec<ColumnFamilyDescriptor> {
    vec![
        ColumnFamilyDescriptor::new(CF_RECORDS, records_options()),
        ColumnFamilyDescriptor::new(CF_SEQUENCE, Options::default()),
    ]
}
