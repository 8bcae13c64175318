//! # regform-core
//!
//! The record model, validation rules and persistence gateway for Regform.
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: no async, no network dependencies
//! - Validation happens before write: the gateway only accepts a
//!   [`ValidRegistration`], which only [`validate`] can produce
//! - Every save is an insert; records are immutable once stored

// =============================================================================
// MODULES
// =============================================================================

pub mod primitives;
pub mod registry;
pub mod storage;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use registry::{RegisterError, Registry, StorageBackend};
pub use storage::RedbStore;
pub use store::{MemoryStore, RegistrationStore};
pub use types::{Field, RegformError, Registration, RegistrationForm, RegistrationId};
pub use validation::{FieldError, FieldErrors, ValidRegistration, validate};
