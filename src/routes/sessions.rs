//! Page session lifecycle routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use uuid::Uuid;

use super::session_error_to_api;
use crate::error::ApiError;
use crate::services::session;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MountResponse {
    pub id: Uuid,
}

/// `POST /api/sessions` — mount a page.
pub async fn mount(State(state): State<AppState>) -> (StatusCode, Json<MountResponse>) {
    let id = session::mount(&state).await;
    (StatusCode::CREATED, Json(MountResponse { id }))
}

/// `DELETE /api/sessions/:id` — unmount a page.
pub async fn unmount(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    session::unmount(&state, id)
        .await
        .map_err(session_error_to_api)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;
