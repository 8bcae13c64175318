//! # Primitives
//!
//! Fixed limits shared by validation, storage and the HTTP layer.

/// Maximum length of each text field, counted in characters.
///
/// Applies to `name`, `state` and `country` alike. The same bound is used
/// for the HTML `maxlength` attribute so the browser and server agree.
pub const MAX_FIELD_LENGTH: usize = 100;

/// First identifier handed out by an empty store.
pub const FIRST_ID: u64 = 1;
