//! # redb-backed Registration Storage
//!
//! A disk-backed store using the redb embedded database.
//!
//! ## Layout
//!
//! - `registrations`: id (u64) -> postcard-encoded `Registration`
//! - `metadata`: key -> u64 (currently only `next_id`)
//!
//! Id assignment, the row insert and the counter update share one write
//! transaction. The counter is persisted, so identifiers are never reused
//! across restarts.

use crate::primitives::FIRST_ID;
use crate::store::RegistrationStore;
use crate::types::{RegformError, Registration, RegistrationId};
use crate::validation::ValidRegistration;
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::fmt::Display;
use std::path::Path;

/// Table for records: id -> serialized Registration bytes
const REGISTRATIONS: TableDefinition<u64, &[u8]> = TableDefinition::new("registrations");

/// Table for metadata: key string -> value u64
const METADATA: TableDefinition<&str, u64> = TableDefinition::new("metadata");

const NEXT_ID_KEY: &str = "next_id";

fn io_err(e: impl Display) -> RegformError {
    RegformError::IoError(e.to_string())
}

/// A disk-backed registration store using redb.
pub struct RedbStore {
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a registration database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RegformError> {
        let db = Database::create(path.as_ref()).map_err(io_err)?;

        // Initialize tables if they don't exist
        {
            let write_txn = db.begin_write().map_err(io_err)?;
            let _ = write_txn.open_table(REGISTRATIONS).map_err(io_err)?;
            let _ = write_txn.open_table(METADATA).map_err(io_err)?;
            write_txn.commit().map_err(io_err)?;
        }

        Ok(Self { db })
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<u64, RegformError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(REGISTRATIONS).map_err(io_err)?;
        table.len().map_err(io_err)
    }

    /// The identifier the next `save` will assign.
    pub(crate) fn next_id(&self) -> Result<RegistrationId, RegformError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(METADATA).map_err(io_err)?;
        let next = table
            .get(NEXT_ID_KEY)
            .map_err(io_err)?
            .map(|v| v.value())
            .unwrap_or(FIRST_ID);
        Ok(RegistrationId(next))
    }
}

impl RegistrationStore for RedbStore {
    fn save(&mut self, record: ValidRegistration) -> Result<Registration, RegformError> {
        let write_txn = self.db.begin_write().map_err(io_err)?;

        let stored = {
            let mut meta_table = write_txn.open_table(METADATA).map_err(io_err)?;
            let id = meta_table
                .get(NEXT_ID_KEY)
                .map_err(io_err)?
                .map(|v| v.value())
                .unwrap_or(FIRST_ID);
            let following = id.checked_add(1).ok_or(RegformError::IdExhausted)?;

            let stored = record.into_record(RegistrationId(id));
            let bytes = postcard::to_allocvec(&stored)
                .map_err(|e| RegformError::SerializationError(e.to_string()))?;

            let mut records_table = write_txn.open_table(REGISTRATIONS).map_err(io_err)?;
            records_table
                .insert(id, bytes.as_slice())
                .map_err(io_err)?;
            meta_table.insert(NEXT_ID_KEY, following).map_err(io_err)?;
            stored
        };

        write_txn.commit().map_err(io_err)?;
        Ok(stored)
    }

    fn find_all(&self) -> Result<Vec<Registration>, RegformError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(REGISTRATIONS).map_err(io_err)?;

        let mut records = Vec::new();
        for entry in table.iter().map_err(io_err)? {
            let (_, value) = entry.map_err(io_err)?;
            let record: Registration = postcard::from_bytes(value.value())
                .map_err(|e| RegformError::DeserializationError(e.to_string()))?;
            records.push(record);
        }
        Ok(records)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RegistrationForm;
    use crate::validation::validate;
    use tempfile::tempdir;

    fn valid(name: &str, state: &str, country: &str) -> ValidRegistration {
        validate(&RegistrationForm::new(name, state, country)).expect("valid form")
    }

    #[test]
    fn basic_operations() {
        let temp = tempdir().expect("temp dir");
        let mut store = RedbStore::open(temp.path().join("test.redb")).expect("open db");

        assert_eq!(store.count().expect("count"), 0);
        assert_eq!(store.next_id().expect("next id"), RegistrationId(1));

        let saved = store.save(valid("Ravi Kumar", "Andhra Pradesh", "India")).expect("save");
        assert_eq!(saved.id(), RegistrationId(1));
        assert_eq!(store.count().expect("count"), 1);
        assert_eq!(store.next_id().expect("next id"), RegistrationId(2));

        let all = store.find_all().expect("find all");
        assert_eq!(all, vec![saved]);
    }

    #[test]
    fn find_all_is_in_id_order() {
        let temp = tempdir().expect("temp dir");
        let mut store = RedbStore::open(temp.path().join("test.redb")).expect("open db");

        for name in ["c", "a", "b"] {
            store.save(valid(name, "s", "c")).expect("save");
        }

        let ids: Vec<u64> = store
            .find_all()
            .expect("find all")
            .iter()
            .map(|r| r.id().value())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn exhausted_counter_leaves_store_untouched() {
        let temp = tempdir().expect("temp dir");
        let mut store = RedbStore::open(temp.path().join("test.redb")).expect("open db");

        {
            let write_txn = store.db.begin_write().expect("txn");
            {
                let mut meta = write_txn.open_table(METADATA).expect("meta");
                meta.insert(NEXT_ID_KEY, u64::MAX).expect("insert");
            }
            write_txn.commit().expect("commit");
        }

        let result = store.save(valid("a", "b", "c"));
        assert!(matches!(result, Err(RegformError::IdExhausted)));
        assert_eq!(store.count().expect("count"), 0);
    }
}
