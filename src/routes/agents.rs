//! Agent board routes.

use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;
use uuid::Uuid;

use super::session_error_to_api;
use crate::error::ApiError;
use crate::services::agents::{AgentTask, Transition};
use crate::services::session;
use crate::state::AppState;

/// SSE event name for one task status change.
pub const TRANSITION_EVENT: &str = "transition";

#[derive(Debug, Serialize)]
pub struct RunResponse {
    /// `false` when a run for the task was already in flight.
    pub started: bool,
}

/// `GET /api/sessions/:id/agents` — every task's status and result.
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AgentTask>>, ApiError> {
    let tasks = session::agent_tasks(&state, id)
        .await
        .map_err(session_error_to_api)?;
    Ok(Json(tasks))
}

/// `POST /api/sessions/:id/agents/:task_id/run` — start a run. The task is
/// THINKING by the time this responds.
pub async fn run_task(
    State(state): State<AppState>,
    Path((id, task_id)): Path<(Uuid, String)>,
) -> Result<(StatusCode, Json<RunResponse>), ApiError> {
    let started = session::run_agent(&state, id, &task_id)
        .await
        .map_err(session_error_to_api)?;
    Ok((StatusCode::ACCEPTED, Json(RunResponse { started })))
}

/// `GET /api/sessions/:id/agents/events` — server-sent status changes. The
/// stream ends once the session is gone and its runs have finished.
pub async fn task_events(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let rx = session::agent_events(&state, id)
        .await
        .map_err(session_error_to_api)?;
    Ok(Sse::new(transition_stream(id, rx)).keep_alive(KeepAlive::default()))
}

fn transition_stream(
    session_id: Uuid,
    rx: broadcast::Receiver<Transition>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    futures::stream::unfold(rx, move |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(transition) => {
                    let event = Event::default().event(TRANSITION_EVENT);
                    match event.json_data(&transition) {
                        Ok(event) => return Some((Ok(event), rx)),
                        Err(e) => warn!(%session_id, error = %e, "agents: transition encode failed"),
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(%session_id, skipped, "agents: event stream lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}

#[cfg(test)]
#[path = "agents_test.rs"]
mod tests;
