//! # Validation
//!
//! Field rules for a submitted registration.
//!
//! Every field is checked against every rule, so a single pass reports all
//! problems at once:
//! - non-blank after trimming
//! - at most [`MAX_FIELD_LENGTH`] characters
//!
//! A successful pass yields a [`ValidRegistration`], the only input the
//! persistence gateway accepts.

use crate::primitives::MAX_FIELD_LENGTH;
use crate::types::{Field, Registration, RegistrationForm, RegistrationId};
use serde::Serialize;

// =============================================================================
// FIELD ERRORS
// =============================================================================

/// A single failed rule on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// All rule failures found in a submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages attached to one field.
    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    #[must_use]
    pub fn has_error(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    fn push(&mut self, field: Field, message: String) {
        self.0.push(FieldError { field, message });
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// VALID REGISTRATION
// =============================================================================

/// A submission that passed every rule. Has no id until it is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    name: String,
    state: String,
    country: String,
}

impl ValidRegistration {
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

    /// Attach the store-assigned id.
    pub(crate) fn into_record(self, id: RegistrationId) -> Registration {
        Registration::new(id, self.name, self.state, self.country)
    }
}

// =============================================================================
// RULES
// =============================================================================

/// Check one field value, appending a message for each failed rule.
fn check_field(field: Field, value: &str, errors: &mut FieldErrors) {
    if value.trim().is_empty() {
        errors.push(field, format!("{} is required", field.label()));
    }
    if value.chars().count() > MAX_FIELD_LENGTH {
        errors.push(
            field,
            format!(
                "{} must not exceed {} characters",
                field.label(),
                MAX_FIELD_LENGTH
            ),
        );
    }
}

/// Validate a submitted form.
///
/// Values are kept exactly as submitted; trimming only applies to the blank
/// check.
pub fn validate(form: &RegistrationForm) -> Result<ValidRegistration, FieldErrors> {
    let mut errors = FieldErrors::default();
    for field in Field::ALL {
        check_field(field, form.get(field), &mut errors);
    }

    if errors.is_empty() {
        Ok(ValidRegistration {
            name: form.name.clone(),
            state: form.state.clone(),
            country: form.country.clone(),
        })
    } else {
        Err(errors)
    }
}

// =============================================================================
// TESTS
// =============================================================================
