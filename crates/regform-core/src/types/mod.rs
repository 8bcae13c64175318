//! # Core Type Definitions
//!
//! - Record identifiers (`RegistrationId`)
//! - The unsaved submission (`RegistrationForm`) and the stored record
//!   (`Registration`)
//! - Field names (`Field`)
//! - Error types (`RegformError`)
//!
//! An unsaved submission has no identifier at all; a `Registration` always
//! has one and exposes no way to change it.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Surrogate identifier assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(pub u64);

impl RegistrationId {
    /// Get the raw identifier value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// FIELDS
// =============================================================================

/// The three user-supplied text fields of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    State,
    Country,
}

impl Field {
    /// All fields, in the order they are validated and displayed.
    pub const ALL: [Self; 3] = [Self::Name, Self::State, Self::Country];

    /// Form parameter name (also the HTML element id).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::State => "state",
            Self::Country => "country",
        }
    }

    /// Human-readable label used in messages and form labels.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::State => "State",
            Self::Country => "Country",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// REGISTRATION FORM (unsaved)
// =============================================================================

/// A registration as submitted, before validation and without an id.
///
/// Missing fields deserialize as empty strings so that an absent form
/// parameter is reported as a blank field rather than a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
}

impl RegistrationForm {
    /// Create a form from the three field values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            state: state.into(),
            country: country.into(),
        }
    }

    /// Value of the given field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::State => &self.state,
            Field::Country => &self.country,
        }
    }
}

// =============================================================================
// REGISTRATION (stored)
// =============================================================================

/// A persisted registration.
///
/// Only the storage layer constructs these, so every instance carries a
/// store-assigned id and fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    id: RegistrationId,
    name: String,
    state: String,
    country: String,
}

impl Registration {
    pub(crate) fn new(id: RegistrationId, name: String, state: String, country: String) -> Self {
        Self {
            id,
            name,
            state,
            country,
        }
    }

    #[must_use]
    pub const fn id(&self) -> RegistrationId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Copy the text fields back into a form, e.g. to echo them in a view.
    #[must_use]
    pub fn to_form(&self) -> RegistrationForm {
        RegistrationForm::new(&self.name, &self.state, &self.country)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised by the persistence gateway and its callers.
///
/// Field validation failures are not errors of this type: they are values
/// (`FieldErrors`) that the caller renders back to the user.
#[derive(Debug, Error)]
pub enum RegformError {
    /// An I/O or database error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// A record could not be encoded for storage.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A stored record could not be decoded.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// Input was rejected before reaching the store.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A target that must not be overwritten already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// No identifiers remain.
    #[error("Identifier space exhausted")]
    IdExhausted,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_match_form_parameters() {
        let names: Vec<_> = Field::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(names, vec!["name", "state", "country"]);
    }

    #[test]
    fn form_get_returns_matching_value() {
        let form = RegistrationForm::new("Ada", "Kerala", "India");
        assert_eq!(form.get(Field::Name), "Ada");
        assert_eq!(form.get(Field::State), "Kerala");
        assert_eq!(form.get(Field::Country), "India");
    }

    #[test]
    fn registration_echoes_back_into_form() {
        let record = Registration::new(
            RegistrationId(7),
            "Ada".to_string(),
            "Kerala".to_string(),
            "India".to_string(),
        );
        assert_eq!(record.id().value(), 7);
        assert_eq!(record.to_form(), RegistrationForm::new("Ada", "Kerala", "India"));
    }

    #[test]
    fn id_display_is_bare_number() {
        assert_eq!(RegistrationId(42).to_string(), "42");
    }
}
