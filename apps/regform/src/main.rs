//! # Regform - Registration Server
//!
//! The main binary: HTML registration form, JSON listing and a CLI for
//! inspecting the database.
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! regform server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! regform status
//! regform list --json-mode
//! regform register --name "John Doe" --state "Tamil Nadu" --country India
//! ```

use clap::Parser;
use regform::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // REGFORM_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("REGFORM_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "regform=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  ┌─┐┌─┐┌─┐┌─┐┌─┐┬─┐┌┬┐
  ├┬┘├┤ │ ┬├┤ │ │├┬┘│││
  ┴└─└─┘└─┘└  └─┘┴└─┴ ┴

  Registration Server v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
