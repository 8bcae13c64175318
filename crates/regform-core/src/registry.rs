//! # Registry
//!
//! Backend-agnostic facade over the persistence gateway.
//!
//! ## Storage Backends
//!
//! - `InMemory`: uses [`MemoryStore`] (fast, volatile)
//! - `Persistent`: uses [`RedbStore`] for disk-backed ACID storage
//!
//! The app layer holds one `Registry` and never touches a backend directly.

use crate::storage::RedbStore;
use crate::store::{MemoryStore, RegistrationStore};
use crate::types::{RegformError, Registration, RegistrationForm, RegistrationId};
use crate::validation::{FieldErrors, ValidRegistration, validate};
use std::path::Path;
use thiserror::Error;

/// Storage backend for a Registry.
#[derive(Debug)]
pub enum StorageBackend {
    /// Volatile in-memory store.
    InMemory(MemoryStore),
    /// Disk-backed store using redb (ACID, persistent).
    Persistent(RedbStore),
}

/// Why a submission was not registered.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// One or more fields failed validation. Nothing was stored.
    #[error("registration rejected: {} field error(s)", .0.len())]
    Invalid(FieldErrors),

    /// The submission was valid but the store failed.
    #[error(transparent)]
    Store(#[from] RegformError),
}

/// Registration facade combining validation and storage.
#[derive(Debug)]
pub struct Registry {
    backend: StorageBackend,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a registry with an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            backend: StorageBackend::InMemory(MemoryStore::new()),
        }
    }

    /// Create a registry with persistent redb storage.
    ///
    /// Opens or creates a redb database at the given path.
    pub fn with_redb(path: impl AsRef<Path>) -> Result<Self, RegformError> {
        let store = RedbStore::open(path)?;
        Ok(Self {
            backend: StorageBackend::Persistent(store),
        })
    }

    /// Whether records survive process restarts.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        matches!(self.backend, StorageBackend::Persistent(_))
    }

    /// Short backend name for logs and CLI output.
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self.backend {
            StorageBackend::InMemory(_) => "memory",
            StorageBackend::Persistent(_) => "redb",
        }
    }

    fn store(&self) -> &dyn RegistrationStore {
        match &self.backend {
            StorageBackend::InMemory(store) => store,
            StorageBackend::Persistent(store) => store,
        }
    }

    fn store_mut(&mut self) -> &mut dyn RegistrationStore {
        match &mut self.backend {
            StorageBackend::InMemory(store) => store,
            StorageBackend::Persistent(store) => store,
        }
    }

    /// Validate a submission and, if every rule passes, persist it.
    pub fn register(&mut self, form: &RegistrationForm) -> Result<Registration, RegisterError> {
        let valid = validate(form).map_err(RegisterError::Invalid)?;
        Ok(self.save(valid)?)
    }

    /// Persist an already validated registration.
    pub fn save(&mut self, record: ValidRegistration) -> Result<Registration, RegformError> {
        self.store_mut().save(record)
    }

    /// Every persisted registration.
    pub fn find_all(&self) -> Result<Vec<Registration>, RegformError> {
        self.store().find_all()
    }

    /// Number of persisted registrations.
    pub fn count(&self) -> Result<u64, RegformError> {
        match &self.backend {
            StorageBackend::InMemory(store) => Ok(store.len() as u64),
            StorageBackend::Persistent(store) => store.count(),
        }
    }

    /// The identifier the next successful save will assign.
    pub fn next_id(&self) -> Result<RegistrationId, RegformError> {
        match &self.backend {
            StorageBackend::InMemory(store) => Ok(store.next_id()),
            StorageBackend::Persistent(store) => store.next_id(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Field;

    #[test]
    fn register_valid_form_persists() {
        let mut registry = Registry::new();
        let form = RegistrationForm::new("John Doe", "Tamil Nadu", "India");

        let saved = registry.register(&form).expect("register");
        assert_eq!(saved.id(), RegistrationId(1));
        assert_eq!(saved.to_form(), form);
        assert_eq!(registry.count().expect("count"), 1);
    }

    #[test]
    fn register_invalid_form_stores_nothing() {
        let mut registry = Registry::new();
        let form = RegistrationForm::new("", "California", "United States");

        let result = registry.register(&form);
        assert!(matches!(
            &result,
            Err(RegisterError::Invalid(errors)) if errors.has_error(Field::Name) && errors.len() == 1
        ));
        assert!(registry.find_all().expect("find").is_empty());
    }

    #[test]
    fn next_id_advances_only_on_save() {
        let mut registry = Registry::new();
        assert_eq!(registry.next_id().expect("next id"), RegistrationId(1));

        let _ = registry.register(&RegistrationForm::new("", "Goa", "India"));
        assert_eq!(registry.next_id().expect("next id"), RegistrationId(1));

        registry
            .register(&RegistrationForm::new("Asha", "Goa", "India"))
            .expect("register");
        assert_eq!(registry.next_id().expect("next id"), RegistrationId(2));
    }

    #[test]
    fn persistent_next_id_survives_reopen() {
        let temp = tempfile::tempdir().expect("temp dir");
        let path = temp.path().join("registry.redb");

        {
            let mut registry = Registry::with_redb(&path).expect("open");
            registry
                .register(&RegistrationForm::new("Asha", "Goa", "India"))
                .expect("register");
        }

        let registry = Registry::with_redb(&path).expect("reopen");
        assert!(registry.is_persistent());
        assert_eq!(registry.next_id().expect("next id"), RegistrationId(2));
    }

    #[test]
    fn backend_reporting() {
        let registry = Registry::new();
        assert!(!registry.is_persistent());
        assert_eq!(registry.backend_name(), "memory");
    }
}
