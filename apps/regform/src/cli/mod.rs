//! # Regform CLI Module
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `status` - Show record count and backend
//! - `list` - Print all registrations
//! - `register` - Validate and store one registration
//! - `init` - Initialize a new database

mod commands;

use crate::config::{Backend, Config};
use clap::{Parser, Subcommand};
use regform_core::{RegformError, RegistrationForm};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Regform - registration form server
///
/// Collects name/state/country registrations through an HTML form and
/// stores them in an embedded database.
#[derive(Parser, Debug)]
#[command(name = "regform")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the registration database (overrides config)
    #[arg(short = 'D', long, global = true)]
    pub database: Option<PathBuf>,

    /// Storage backend: "redb" (persistent) or "memory" (overrides config)
    #[arg(short = 'B', long, global = true)]
    pub backend: Option<Backend>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show record count and backend
    Status,

    /// Print all registrations
    List,

    /// Validate and store one registration
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        state: String,

        #[arg(long)]
        country: String,
    },

    /// Initialize a new empty database
    Init {
        /// Overwrite an existing database
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Load configuration and apply global flag overrides.
    pub fn resolve_config(&self) -> Result<Config, RegformError> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(database) = &self.database {
            config.storage.database.clone_from(database);
        }
        if let Some(backend) = self.backend {
            config.storage.backend = backend;
        }
        Ok(config)
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), RegformError> {
    let mut config = cli.resolve_config()?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_server(&config).await
        }
        Some(Commands::Status) | None => cmd_status(&config, json_mode),
        Some(Commands::List) => cmd_list(&config, json_mode),
        Some(Commands::Register {
            name,
            state,
            country,
        }) => cmd_register(
            &config,
            &RegistrationForm::new(name, state, country),
            json_mode,
        ),
        Some(Commands::Init { force }) => cmd_init(&config, force),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_overrides() {
        let cli = Cli::try_parse_from([
            "regform", "-B", "memory", "-D", "other.redb", "--json-mode", "status",
        ])
        .expect("parse");

        assert_eq!(cli.backend, Some(Backend::Memory));
        assert_eq!(cli.database, Some(PathBuf::from("other.redb")));
        assert!(cli.json_mode);
        assert!(matches!(cli.command, Some(Commands::Status)));
    }

    #[test]
    fn parses_register_fields() {
        let cli = Cli::try_parse_from([
            "regform", "register", "--name", "John Doe", "--state", "Tamil Nadu", "--country",
            "India",
        ])
        .expect("parse");

        assert!(matches!(
            cli.command,
            Some(Commands::Register { ref name, ref state, ref country })
                if name == "John Doe" && state == "Tamil Nadu" && country == "India"
        ));
    }

    #[test]
    fn rejects_unknown_backend() {
        let result = Cli::try_parse_from(["regform", "-B", "postgres", "status"]);
        assert!(result.is_err());
    }

    #[test]
    fn server_flags_are_optional() {
        let cli = Cli::try_parse_from(["regform", "server", "-p", "9000"]).expect("parse");
        assert!(matches!(
            cli.command,
            Some(Commands::Server { host: None, port: Some(9000) })
        ));
    }
}
