//! # Persistence Tests
//!
//! Behavior of the redb-backed registry across reopen cycles.

use regform_core::{RegisterError, Registry, RegistrationForm, RegistrationId};
use tempfile::tempdir;

#[test]
fn records_survive_reopen() {
    let temp = tempdir().expect("temp dir");
    let db_path = temp.path().join("registrations.redb");

    {
        let mut registry = Registry::with_redb(&db_path).expect("open");
        assert!(registry.is_persistent());
        registry
            .register(&RegistrationForm::new("Alice", "Rajasthan", "India"))
            .expect("register");
        registry
            .register(&RegistrationForm::new("Bob", "Kerala", "India"))
            .expect("register");
    }

    let registry = Registry::with_redb(&db_path).expect("reopen");
    let all = registry.find_all().expect("find all");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name(), "Alice");
    assert_eq!(all[1].name(), "Bob");
    assert_eq!(registry.count().expect("count"), 2);
}

#[test]
fn ids_are_not_reused_after_reopen() {
    let temp = tempdir().expect("temp dir");
    let db_path = temp.path().join("registrations.redb");

    let first = {
        let mut registry = Registry::with_redb(&db_path).expect("open");
        registry
            .register(&RegistrationForm::new("Priya Singh", "Maharashtra", "India"))
            .expect("register")
    };

    let mut registry = Registry::with_redb(&db_path).expect("reopen");
    let second = registry
        .register(&RegistrationForm::new("Ravi Kumar", "Andhra Pradesh", "India"))
        .expect("register");

    assert_eq!(first.id(), RegistrationId(1));
    assert_eq!(second.id(), RegistrationId(2));
}

#[test]
fn rejected_submission_leaves_database_empty() {
    let temp = tempdir().expect("temp dir");
    let mut registry = Registry::with_redb(temp.path().join("db.redb")).expect("open");

    let result = registry.register(&RegistrationForm::new("Jane", "Goa", ""));
    assert!(matches!(result, Err(RegisterError::Invalid(_))));
    assert_eq!(registry.count().expect("count"), 0);
}

#[test]
fn unicode_values_are_stored_verbatim() {
    let temp = tempdir().expect("temp dir");
    let db_path = temp.path().join("db.redb");
    let form = RegistrationForm::new("Zoë Ångström", "Île-de-France", "France");

    {
        let mut registry = Registry::with_redb(&db_path).expect("open");
        registry.register(&form).expect("register");
    }

    let registry = Registry::with_redb(&db_path).expect("reopen");
    let all = registry.find_all().expect("find all");
    assert_eq!(all[0].to_form(), form);
}
