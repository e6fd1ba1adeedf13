//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the content generator and a map of live page sessions. A session
//! stands in for one mounted page: it owns a cart and an agent board for its
//! lifetime and is discarded on unmount. Nothing is persisted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::Timings;
use crate::llm::ContentGenerator;
use crate::services::agents::AgentBoard;
use crate::services::cart::{Cart, CartAction};

// =============================================================================
// PAGE SESSION
// =============================================================================

/// Per-page live state.
pub struct PageSession {
    cart: Mutex<Cart>,
    pub agents: AgentBoard,
    /// Pending first-task auto-run; aborted on unmount.
    auto_run: Option<JoinHandle<()>>,
    pub mounted_at: Instant,
}

impl PageSession {
    #[must_use]
    pub fn new(agents: AgentBoard, auto_run: Option<JoinHandle<()>>) -> Self {
        Self { cart: Mutex::new(Cart::new()), agents, auto_run, mounted_at: Instant::now() }
    }

    /// Current cart snapshot.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reduce the cart by one action and return the new snapshot.
    pub fn dispatch(&self, action: CartAction) -> Cart {
        let mut guard = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        let next = guard.clone().apply(action);
        *guard = next.clone();
        next
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        if let Some(handle) = self.auto_run.take() {
            handle.abort();
        }
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Cloned into every handler; shared fields sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<Uuid, Arc<PageSession>>>>,
    pub generator: Arc<dyn ContentGenerator>,
    pub timings: Timings,
    /// Live session cap; mounting past it evicts the oldest session.
    pub max_sessions: usize,
}

impl AppState {
    #[must_use]
    pub fn new(generator: Arc<dyn ContentGenerator>, timings: Timings, max_sessions: usize) -> Self {
        Self { sessions: Arc::new(RwLock::new(HashMap::new())), generator, timings, max_sessions: max_sessions.max(1) }
    }

    /// Build a fresh agent board wired to the shared generator.
    #[must_use]
    pub fn new_board(&self) -> AgentBoard {
        AgentBoard::new(self.generator.clone(), self.timings.thinking)
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::config::DEFAULT_MAX_SESSIONS;
    use crate::llm::demo::DemoGenerator;

    /// `AppState` with zero delays and the offline demo generator.
    #[must_use]
    pub fn test_app_state() -> AppState {
        let timings = Timings::zero();
        AppState::new(Arc::new(DemoGenerator::new(timings.demo)), timings, DEFAULT_MAX_SESSIONS)
    }

    /// `AppState` with zero delays and the given generator.
    #[must_use]
    pub fn test_app_state_with_llm(generator: Arc<dyn ContentGenerator>) -> AppState {
        AppState::new(generator, Timings::zero(), DEFAULT_MAX_SESSIONS)
    }

    /// Insert a session without scheduling an auto-run.
    pub async fn seed_session(state: &AppState) -> Uuid {
        let id = Uuid::new_v4();
        let session = Arc::new(PageSession::new(state.new_board(), None));
        state.sessions.write().await.insert(id, session);
        id
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
