//! HTML page routes.
//!
//! DESIGN
//! ======
//! `GET /` mounts a page session and redirects to `/sessions/{id}`. The
//! page's forms post back under that path; each handler applies one session
//! operation and answers 303 to the page anchor it came from.

use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;
use uuid::Uuid;

use super::session_error_to_api;
use crate::components::session_base;
use crate::error::ApiError;
use crate::render::{PageView, render_or_fallback};
use crate::services::session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: String,
}

fn back_to(id: Uuid, anchor: &str) -> Redirect {
    Redirect::to(&format!("{}#{anchor}", session_base(id)))
}

/// `GET /` — mount a fresh page and send the browser to it.
pub async fn index(State(state): State<AppState>) -> Redirect {
    let id = session::mount(&state).await;
    Redirect::to(&session_base(id))
}

/// `GET /sessions/:id` and `GET /api/sessions/:id/page` — the page for a live session.
pub async fn session_page(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Html<String>, ApiError> {
    let session = session::get(&state, id).await.map_err(session_error_to_api)?;
    let page = PageView { session_id: id, cart: session.cart(), tasks: session.agents.snapshot().tasks().to_vec() };
    Ok(Html(render_or_fallback(page)))
}

/// `POST /sessions/:id/cart/add`
pub async fn add_to_cart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect, ApiError> {
    session::add_to_cart(&state, id, &form.product_id)
        .await
        .map_err(session_error_to_api)?;
    Ok(back_to(id, "store"))
}

/// `POST /sessions/:id/cart/remove`
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect, ApiError> {
    session::remove_from_cart(&state, id, &form.product_id)
        .await
        .map_err(session_error_to_api)?;
    Ok(back_to(id, "store"))
}

/// `POST /sessions/:id/cart/toggle`
pub async fn toggle_cart(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Redirect, ApiError> {
    session::toggle_cart(&state, id)
        .await
        .map_err(session_error_to_api)?;
    Ok(back_to(id, "store"))
}

/// `POST /sessions/:id/cart/close`
pub async fn close_cart(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Redirect, ApiError> {
    session::close_cart(&state, id)
        .await
        .map_err(session_error_to_api)?;
    Ok(back_to(id, "store"))
}

/// `POST /sessions/:id/agents/:task_id/run` — a busy task is left alone.
pub async fn run_agent(
    State(state): State<AppState>,
    Path((id, task_id)): Path<(Uuid, String)>,
) -> Result<Redirect, ApiError> {
    session::run_agent(&state, id, &task_id)
        .await
        .map_err(session_error_to_api)?;
    Ok(back_to(id, "agents"))
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
