//! Session service — page mount/unmount and cart/agent operations by id.
//!
//! ARCHITECTURE
//! ============
//! Route handlers translate HTTP into these calls. Each call resolves the
//! session, then hands off to the cart reducer or the agent board; neither
//! of those knows about sessions.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;
use uuid::Uuid;

use crate::catalog::{self, CHECKOUT_URL};
use crate::error::ErrorCode;
use crate::services::agents::{AgentError, AgentTask, Transition};
use crate::services::cart::{Cart, CartAction};
use crate::state::{AppState, PageSession};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(Uuid),
    #[error("product not found: {0}")]
    UnknownProduct(String),
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error("checkout unavailable: cart is empty")]
    CheckoutUnavailable,
}

impl ErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_SESSION_NOT_FOUND",
            Self::UnknownProduct(_) => "E_UNKNOWN_PRODUCT",
            Self::Agent(e) => e.error_code(),
            Self::CheckoutUnavailable => "E_CHECKOUT_UNAVAILABLE",
        }
    }
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// Mount a page: empty cart, idle board, first-task auto-run scheduled.
/// At the session cap the oldest session is unmounted first.
pub async fn mount(state: &AppState) -> Uuid {
    let id = Uuid::new_v4();
    let agents = state.new_board();
    let auto_run = agents.schedule_auto_run(state.timings.autorun);
    let session = Arc::new(PageSession::new(agents, Some(auto_run)));

    let mut sessions = state.sessions.write().await;
    while sessions.len() >= state.max_sessions {
        let Some(oldest) = sessions.iter().min_by_key(|(_, s)| s.mounted_at).map(|(id, _)| *id) else {
            break;
        };
        sessions.remove(&oldest);
        info!(session_id = %oldest, "session: evicted oldest");
    }
    sessions.insert(id, session);
    drop(sessions);
    info!(session_id = %id, "session: mounted");
    id
}

/// Unmount a page. Runs already in flight finish on their own.
///
/// # Errors
///
/// Returns [`SessionError::NotFound`] for an unknown id.
pub async fn unmount(state: &AppState, id: Uuid) -> Result<(), SessionError> {
    let removed = state.sessions.write().await.remove(&id);
    if removed.is_none() {
        return Err(SessionError::NotFound(id));
    }
    info!(session_id = %id, "session: unmounted");
    Ok(())
}

/// Resolve a live session.
///
/// # Errors
///
/// Returns [`SessionError::NotFound`] for an unknown id.
pub async fn get(state: &AppState, id: Uuid) -> Result<Arc<PageSession>, SessionError> {
    state
        .sessions
        .read()
        .await
        .get(&id)
        .cloned()
        .ok_or(SessionError::NotFound(id))
}

// =============================================================================
// CART
// =============================================================================

/// # Errors
///
/// Unknown session or product.
pub async fn add_to_cart(state: &AppState, id: Uuid, product_id: &str) -> Result<Cart, SessionError> {
    let product = catalog::find_product(product_id)
        .cloned()
        .ok_or_else(|| SessionError::UnknownProduct(product_id.to_string()))?;
    let session = get(state, id).await?;
    Ok(session.dispatch(CartAction::Add(product)))
}

/// Removing a product that is not in the cart is a no-op.
///
/// # Errors
///
/// Unknown session.
pub async fn remove_from_cart(state: &AppState, id: Uuid, product_id: &str) -> Result<Cart, SessionError> {
    let session = get(state, id).await?;
    Ok(session.dispatch(CartAction::Remove(product_id.to_string())))
}

/// # Errors
///
/// Unknown session.
pub async fn toggle_cart(state: &AppState, id: Uuid) -> Result<Cart, SessionError> {
    Ok(get(state, id).await?.dispatch(CartAction::Toggle))
}

/// # Errors
///
/// Unknown session.
pub async fn close_cart(state: &AppState, id: Uuid) -> Result<Cart, SessionError> {
    Ok(get(state, id).await?.dispatch(CartAction::Close))
}

/// Checkout destination. Cart contents are not sent along.
///
/// # Errors
///
/// Unknown session, or [`SessionError::CheckoutUnavailable`] on an empty cart.
pub async fn checkout_url(state: &AppState, id: Uuid) -> Result<&'static str, SessionError> {
    let cart = get(state, id).await?.cart();
    if cart.is_empty() {
        return Err(SessionError::CheckoutUnavailable);
    }
    info!(session_id = %id, items = cart.count(), "session: checkout");
    Ok(CHECKOUT_URL)
}

// =============================================================================
// AGENTS
// =============================================================================

/// Start a task run in the background. `false` when the task was busy.
///
/// # Errors
///
/// Unknown session or task.
pub async fn run_agent(state: &AppState, id: Uuid, task_id: &str) -> Result<bool, SessionError> {
    let session = get(state, id).await?;
    Ok(session.agents.spawn_run(task_id)?.is_some())
}

/// # Errors
///
/// Unknown session.
pub async fn agent_tasks(state: &AppState, id: Uuid) -> Result<Vec<AgentTask>, SessionError> {
    Ok(get(state, id).await?.agents.snapshot().tasks().to_vec())
}

/// Subscribe to the session's agent status changes.
///
/// # Errors
///
/// Unknown session.
pub async fn agent_events(state: &AppState, id: Uuid) -> Result<broadcast::Receiver<Transition>, SessionError> {
    Ok(get(state, id).await?.agents.subscribe())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
