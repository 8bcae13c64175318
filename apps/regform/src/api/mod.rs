//! # Regform HTTP Module
//!
//! The HTTP server: HTML registration flow plus a small JSON API.
//!
//! ## Endpoints
//!
//! - `GET /` - Empty registration form
//! - `POST /register` - Validate and save a submission
//! - `GET /success` - Success page
//! - `GET /api/registrations` - All records as JSON
//! - `GET /health` - Health check
//!
//! ## Security Configuration
//!
//! - `cors_origins`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `rate_limit`: Requests per second (default: 100, 0 to disable)
//! - `api_key`: If set, `/api/*` requires Bearer token authentication

mod auth;
mod handlers;
mod middleware;
mod types;
pub mod views;

pub use auth::ApiKey;
pub use handlers::{
    health_handler, list_handler, show_form_handler, submit_handler, success_handler,
};
pub use middleware::{GlobalRateLimiter, create_rate_limiter};
pub use types::{ErrorResponse, HealthResponse};

use crate::config::ServerConfig;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use regform_core::{RegformError, Registry};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum accepted request body. Three 100-character fields fit many times over.
const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the registry.
#[derive(Clone)]
pub struct AppState {
    /// The registry; writers take the write lock only to save.
    pub registry: Arc<RwLock<Registry>>,
}

impl AppState {
    /// Create new app state with a registry.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer from the configured origin list.
///
/// - `"*"`: allows all origins
/// - not set: localhost only
/// - otherwise: the comma-separated origins that parse as header values
fn build_cors_layer(origins: Option<&str>) -> CorsLayer {
    match origins.map(str::trim) {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
            CorsLayer::permissive()
        }
        Some(list) => {
            let allowed_origins: Vec<HeaderValue> = list
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) if !trimmed.is_empty() => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Ok(_) => None,
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
                build_localhost_cors()
            } else {
                restrictive_cors(allowed_origins)
            }
        }
        None => build_localhost_cors(),
    }
}

fn restrictive_cors(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    restrictive_cors(origins)
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting - global (if enabled)
/// 5. Authentication - `/api/*` only (if configured)
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let mut api = Router::new().route("/registrations", get(handlers::list_handler));

    match config.api_key.as_deref().filter(|k| !k.is_empty()) {
        Some(key) => {
            tracing::info!("API key authentication enabled for /api");
            api = api.layer(axum_middleware::from_fn_with_state(
                ApiKey::new(key),
                auth::api_key_auth_middleware,
            ));
        }
        None => tracing::info!("API key authentication disabled; /api is public"),
    }

    let mut router = Router::new()
        .route("/", get(handlers::show_form_handler))
        .route("/register", post(handlers::submit_handler))
        .route("/success", get(handlers::success_handler))
        .route("/health", get(handlers::health_handler))
        .nest("/api", api);

    match create_rate_limiter(config.rate_limit) {
        Some(limiter) => {
            tracing::info!("Rate limiting enabled: {} requests/second", config.rate_limit);
            router = router.layer(axum_middleware::from_fn_with_state(
                limiter,
                middleware::rate_limit_middleware,
            ));
        }
        None => tracing::info!("Rate limiting disabled"),
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(config.cors_origins.as_deref()))
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server");
}

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(config: &ServerConfig, registry: Registry) -> Result<(), RegformError> {
    let addr = config.bind_addr();
    let backend = registry.backend_name();
    let router = create_router(AppState::new(registry), config);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RegformError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!(backend, "Regform HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RegformError::IoError(format!("Server error: {}", e)))
}
