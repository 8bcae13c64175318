//! # Persistence Gateway
//!
//! The narrow storage interface used by the rest of the system, plus the
//! in-memory implementation.
//!
//! Only two operations exist: `save` (always an insert) and `find_all`.
//! Records are never updated or deleted through this interface.

use crate::primitives::FIRST_ID;
use crate::types::{RegformError, Registration, RegistrationId};
use crate::validation::ValidRegistration;
use std::collections::BTreeMap;

// =============================================================================
// STORE TRAIT
// =============================================================================

/// Storage interface for registrations.
pub trait RegistrationStore {
    /// Insert a validated registration, assigning the next identifier.
    fn save(&mut self, record: ValidRegistration) -> Result<Registration, RegformError>;

    /// Every persisted registration, in ascending id order.
    fn find_all(&self) -> Result<Vec<Registration>, RegformError>;
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Volatile store backed by a `BTreeMap`.
///
/// Identifiers restart from [`FIRST_ID`] with every new instance.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    records: BTreeMap<RegistrationId, Registration>,
    next_id: u64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: FIRST_ID,
        }
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) const fn next_id(&self) -> RegistrationId {
        RegistrationId(self.next_id)
    }
}

impl RegistrationStore for MemoryStore {
    fn save(&mut self, record: ValidRegistration) -> Result<Registration, RegformError> {
        let id = RegistrationId(self.next_id);
        self.next_id = self.next_id.checked_add(1).ok_or(RegformError::IdExhausted)?;

        let stored = record.into_record(id);
        self.records.insert(id, stored.clone());
        Ok(stored)
    }

    fn find_all(&self) -> Result<Vec<Registration>, RegformError> {
        Ok(self.records.values().cloned().collect())
    }
}

// =============================================================================
// TESTS
// =============================================================================
