//! # Endpoint Handlers
//!
//! Form routes render HTML; `/api/*` and `/health` return JSON.

use super::{
    AppState,
    types::{ErrorResponse, HealthResponse},
    views,
};
use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use regform_core::{FieldErrors, RegistrationForm, validate};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let registry = state.registry.read().await;
    Json(HealthResponse::ok(registry.backend_name()))
}

// =============================================================================
// FORM HANDLERS
// =============================================================================

/// `GET /` - empty registration form. Never touches the store.
pub async fn show_form_handler() -> Html<String> {
    Html(views::render_form(
        &RegistrationForm::default(),
        &FieldErrors::default(),
    ))
}

/// `POST /register` - validate, persist, and show the outcome.
///
/// A rejected submission re-renders the form with 200 and its field errors.
/// Validation runs before the write lock is taken, so rejected submissions
/// never contend with other writers.
pub async fn submit_handler(
    State(state): State<AppState>,
    Form(form): Form<RegistrationForm>,
) -> Response {
    let valid = match validate(&form) {
        Ok(v) => v,
        Err(errors) => {
            tracing::info!(
                event = "registration_rejected",
                error_count = errors.len(),
                "Registration rejected by validation"
            );
            return (StatusCode::OK, Html(views::render_form(&form, &errors))).into_response();
        }
    };

    let result = state.registry.write().await.save(valid);
    match result {
        Ok(saved) => {
            tracing::info!(
                event = "registration_saved",
                id = saved.id().value(),
                "Registration saved"
            );
            (
                StatusCode::OK,
                Html(views::render_success(Some(&saved.to_form()))),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(event = "registration_failed", error = %e, "Failed to save registration");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::render_failure()),
            )
                .into_response()
        }
    }
}

/// `GET /success` - success page without echoed values.
pub async fn success_handler() -> Html<String> {
    Html(views::render_success(None))
}

// =============================================================================
// API HANDLERS
// =============================================================================

/// `GET /api/registrations` - every stored record as JSON.
pub async fn list_handler(State(state): State<AppState>) -> Response {
    let registry = state.registry.read().await;
    match registry.find_all() {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            tracing::error!(event = "list_failed", error = %e, "Failed to list registrations");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to load registrations")),
            )
                .into_response()
        }
    }
}
