//! # Storage Backends
//!
//! Disk-backed implementations of [`RegistrationStore`](crate::store::RegistrationStore).

mod redb_store;

pub use redb_store::RedbStore;
