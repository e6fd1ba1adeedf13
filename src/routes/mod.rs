//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! `GET /` mounts a page session and redirects to `/sessions/{id}`, whose
//! forms post back under the same prefix. The JSON API under
//! `/api/sessions/{id}/…` drives the same sessions for scripted clients, and
//! `/api/sessions/{id}/agents/events` streams agent status changes as SSE.

pub mod agents;
pub mod cart;
pub mod page;
pub mod sessions;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::services::session::SessionError;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(page::index))
        .route("/healthz", get(healthz))
        .route("/sessions/{id}", get(page::session_page))
        .route("/sessions/{id}/cart/add", post(page::add_to_cart))
        .route("/sessions/{id}/cart/remove", post(page::remove_from_cart))
        .route("/sessions/{id}/cart/toggle", post(page::toggle_cart))
        .route("/sessions/{id}/cart/close", post(page::close_cart))
        .route("/sessions/{id}/agents/{task_id}/run", post(page::run_agent))
        .route("/api/products", get(cart::list_products))
        .route("/api/sessions", post(sessions::mount))
        .route("/api/sessions/{id}", delete(sessions::unmount))
        .route("/api/sessions/{id}/page", get(page::session_page))
        .route("/api/sessions/{id}/cart", get(cart::get_cart))
        .route("/api/sessions/{id}/cart/items", post(cart::add_item))
        .route("/api/sessions/{id}/cart/items/{product_id}", delete(cart::remove_item))
        .route("/api/sessions/{id}/cart/toggle", post(cart::toggle))
        .route("/api/sessions/{id}/cart/close", post(cart::close))
        .route("/api/sessions/{id}/checkout", get(cart::checkout))
        .route("/api/sessions/{id}/agents", get(agents::list_tasks))
        .route("/api/sessions/{id}/agents/events", get(agents::task_events))
        .route("/api/sessions/{id}/agents/{task_id}/run", post(agents::run_task))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub(crate) fn session_error_to_api(err: SessionError) -> ApiError {
    let status = match &err {
        SessionError::NotFound(_) | SessionError::UnknownProduct(_) | SessionError::Agent(_) => {
            StatusCode::NOT_FOUND
        }
        SessionError::CheckoutUnavailable => StatusCode::CONFLICT,
    };
    ApiError::new(status, &err)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
