//! # CLI Command Implementations

use crate::api;
use crate::config::{Backend, Config, StorageConfig};
use regform_core::{RegformError, RegisterError, Registration, RegistrationForm};

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(config: &Config) -> Result<(), RegformError> {
    let registry = config.storage.open_registry()?;

    println!("Regform Registration Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", config.server.host);
    println!("  Port:     {}", config.server.port);
    println!("  Backend:  {}", config.storage.backend.as_str());
    if config.storage.backend == Backend::Redb {
        println!("  Database: {}", config.storage.database.display());
    }
    println!();
    println!("Endpoints:");
    println!("  GET  /                  - Registration form");
    println!("  POST /register          - Submit a registration");
    println!("  GET  /success           - Success page");
    println!("  GET  /api/registrations - All registrations (JSON)");
    println!("  GET  /health            - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(&config.server, registry).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show record count, backend and the next id.
pub fn cmd_status(config: &Config, json_mode: bool) -> Result<(), RegformError> {
    let registry = config.storage.open_registry()?;
    let count = registry.count()?;
    let next_id = registry.next_id()?;

    if json_mode {
        let output = serde_json::json!({
            "backend": registry.backend_name(),
            "database": config.storage.database.to_string_lossy(),
            "persistent": registry.is_persistent(),
            "registrations": count,
            "next_id": next_id,
        });
        println!("{}", to_pretty_json(&output)?);
        return Ok(());
    }

    println!("Regform Status");
    println!("==============");
    println!("Backend:       {}", registry.backend_name());
    if registry.is_persistent() {
        println!("Database:      {}", config.storage.database.display());
    }
    println!("Registrations: {}", count);
    println!("Next id:       {}", next_id);

    Ok(())
}

// =============================================================================
// LIST COMMAND
// =============================================================================

/// Print all registrations.
pub fn cmd_list(config: &Config, json_mode: bool) -> Result<(), RegformError> {
    let registry = config.storage.open_registry()?;
    let records = registry.find_all()?;

    if json_mode {
        println!("{}", to_pretty_json(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No registrations.");
        return Ok(());
    }

    println!("{:>6}  {:<30}  {:<24}  {:<20}", "ID", "NAME", "STATE", "COUNTRY");
    for record in &records {
        println!(
            "{:>6}  {:<30}  {:<24}  {:<20}",
            record.id().value(),
            record.name(),
            record.state(),
            record.country()
        );
    }
    println!();
    println!("{} registration(s)", records.len());

    Ok(())
}

// =============================================================================
// REGISTER COMMAND
// =============================================================================

/// Validate and store one registration.
///
/// On validation failure every field message is printed and the command
/// fails without touching the store.
pub fn cmd_register(
    config: &Config,
    form: &RegistrationForm,
    json_mode: bool,
) -> Result<(), RegformError> {
    let mut registry = config.storage.open_registry()?;

    match registry.register(form) {
        Ok(saved) => print_saved(&saved, json_mode),
        Err(RegisterError::Invalid(errors)) => {
            if json_mode {
                let output = serde_json::json!({ "errors": &errors });
                println!("{}", to_pretty_json(&output)?);
            } else {
                for error in &errors {
                    println!("  {}: {}", error.field, error.message);
                }
            }
            Err(RegformError::InvalidInput(format!(
                "{} field error(s)",
                errors.len()
            )))
        }
        Err(RegisterError::Store(e)) => Err(e),
    }
}

fn print_saved(saved: &Registration, json_mode: bool) -> Result<(), RegformError> {
    if json_mode {
        println!("{}", to_pretty_json(saved)?);
    } else {
        println!(
            "Registered #{}: {}, {}, {}",
            saved.id(),
            saved.name(),
            saved.state(),
            saved.country()
        );
    }
    Ok(())
}

fn to_pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, RegformError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| RegformError::SerializationError(e.to_string()))
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Initialize a new database.
pub fn cmd_init(config: &Config, force: bool) -> Result<(), RegformError> {
    let StorageConfig { backend, database } = &config.storage;

    if *backend != Backend::Redb {
        return Err(RegformError::InvalidConfig(
            "init requires the redb backend".to_string(),
        ));
    }

    if database.exists() {
        if !force {
            return Err(RegformError::AlreadyExists(format!(
                "{} (use --force to overwrite)",
                database.display()
            )));
        }
        std::fs::remove_file(database).map_err(|e| {
            RegformError::IoError(format!("Cannot remove {}: {}", database.display(), e))
        })?;
    }

    config.storage.open_registry()?;
    println!("Initialized new redb database at {}", database.display());
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
