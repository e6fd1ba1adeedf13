use super::*;
use crate::error::ErrorCode;
use crate::services::agents::AgentStatus;
use crate::state::test_helpers;
use std::time::Duration;
use tokio::time::timeout;

async fn wait_for_status(state: &AppState, id: Uuid, task_id: &str, want: AgentStatus) {
    timeout(Duration::from_secs(5), async {
        loop {
            let tasks = agent_tasks(state, id).await.unwrap();
            if tasks.iter().any(|t| t.id == task_id && t.status == want) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("status reached");
}

// =========================================================================
// lifecycle
// =========================================================================

#[tokio::test]
async fn mount_creates_session_and_auto_runs_first_task() {
    let state = test_helpers::test_app_state();
    let id = mount(&state).await;
    assert!(get(&state, id).await.unwrap().cart().is_empty());

    wait_for_status(&state, id, "task1", AgentStatus::Completed).await;
    let tasks = agent_tasks(&state, id).await.unwrap();
    assert!(tasks[0].result.is_some());
    assert_eq!(tasks[1].status, AgentStatus::Idle);
    assert_eq!(tasks[2].status, AgentStatus::Idle);
}

#[tokio::test]
async fn mount_at_cap_evicts_oldest_session() {
    let mut state = test_helpers::test_app_state();
    state.max_sessions = 2;
    let first = mount(&state).await;
    tokio::time::sleep(Duration::from_millis(2)).await;
    let second = mount(&state).await;
    tokio::time::sleep(Duration::from_millis(2)).await;
    let third = mount(&state).await;

    let sessions = state.sessions.read().await;
    assert_eq!(sessions.len(), 2);
    assert!(!sessions.contains_key(&first));
    assert!(sessions.contains_key(&second));
    assert!(sessions.contains_key(&third));
}

#[tokio::test]
async fn agent_events_subscribe_to_the_session_board() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_session(&state).await;
    let mut rx = agent_events(&state, id).await.unwrap();
    assert!(run_agent(&state, id, "task2").await.unwrap());

    let first = timeout(Duration::from_secs(5), rx.recv()).await.unwrap().unwrap();
    assert_eq!(first.task_id, "task2");
    assert_eq!(first.status, AgentStatus::Thinking);
    assert!(agent_events(&state, Uuid::new_v4()).await.is_err());
}

#[tokio::test]
async fn unmount_discards_session() {
    let state = test_helpers::test_app_state();
    let id = mount(&state).await;
    unmount(&state, id).await.unwrap();
    assert!(matches!(get(&state, id).await, Err(SessionError::NotFound(_))));
    assert!(matches!(unmount(&state, id).await, Err(SessionError::NotFound(_))));
}

#[tokio::test]
async fn unknown_session_errors() {
    let state = test_helpers::test_app_state();
    let err = add_to_cart(&state, Uuid::new_v4(), "p1").await.unwrap_err();
    assert_eq!(err.error_code(), "E_SESSION_NOT_FOUND");
}

// =========================================================================
// cart
// =========================================================================

#[tokio::test]
async fn add_and_remove_through_session() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_session(&state).await;

    let _ = add_to_cart(&state, id, "p1").await.unwrap();
    let _ = add_to_cart(&state, id, "p2").await.unwrap();
    let cart = add_to_cart(&state, id, "p2").await.unwrap();
    assert_eq!(cart.count(), 3);
    assert_eq!(cart.total_cents(), 12_700);
    assert!(cart.is_open());

    let cart = remove_from_cart(&state, id, "p1").await.unwrap();
    assert_eq!(cart.count(), 2);
    let again = remove_from_cart(&state, id, "p1").await.unwrap();
    assert_eq!(cart, again);
}

#[tokio::test]
async fn unknown_product_is_rejected() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_session(&state).await;
    let err = add_to_cart(&state, id, "p42").await.unwrap_err();
    assert_eq!(err.error_code(), "E_UNKNOWN_PRODUCT");
    assert!(get(&state, id).await.unwrap().cart().is_empty());
}

#[tokio::test]
async fn remove_on_empty_cart_is_ok() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_session(&state).await;
    let cart = remove_from_cart(&state, id, "p1").await.unwrap();
    assert!(cart.is_empty());
}

#[tokio::test]
async fn toggle_and_close() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_session(&state).await;
    assert!(toggle_cart(&state, id).await.unwrap().is_open());
    assert!(!toggle_cart(&state, id).await.unwrap().is_open());
    let _ = toggle_cart(&state, id).await.unwrap();
    assert!(!close_cart(&state, id).await.unwrap().is_open());
}

#[tokio::test]
async fn checkout_gated_on_non_empty_cart() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_session(&state).await;
    assert!(matches!(checkout_url(&state, id).await, Err(SessionError::CheckoutUnavailable)));

    let _ = add_to_cart(&state, id, "p4").await.unwrap();
    assert_eq!(checkout_url(&state, id).await.unwrap(), CHECKOUT_URL);
}

#[tokio::test]
async fn sessions_do_not_share_carts() {
    let state = test_helpers::test_app_state();
    let a = test_helpers::seed_session(&state).await;
    let b = test_helpers::seed_session(&state).await;
    let _ = add_to_cart(&state, a, "p1").await.unwrap();
    assert!(get(&state, b).await.unwrap().cart().is_empty());
}

// =========================================================================
// agents
// =========================================================================

#[tokio::test]
async fn run_agent_starts_and_completes() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_session(&state).await;
    assert!(run_agent(&state, id, "task3").await.unwrap());
    wait_for_status(&state, id, "task3", AgentStatus::Completed).await;
}

#[tokio::test]
async fn run_unknown_task_maps_agent_error_code() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_session(&state).await;
    let err = run_agent(&state, id, "task7").await.unwrap_err();
    assert_eq!(err.error_code(), "E_UNKNOWN_TASK");
}
