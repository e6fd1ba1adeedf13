use super::*;
use crate::catalog::{AGENTS, CHECKOUT_URL, PRODUCTS, find_product};
use crate::services::agents::{TaskBoard, TaskEvent};
use crate::services::cart::CartAction;

fn page(cart: Cart, tasks: Vec<AgentTask>) -> String {
    render_page(PageView { session_id: Uuid::nil(), cart, tasks }).unwrap()
}

fn idle_tasks() -> Vec<AgentTask> {
    TaskBoard::new().tasks().to_vec()
}

fn base() -> String {
    format!("/sessions/{}", Uuid::nil())
}

#[test]
fn page_has_every_section() {
    let html = page(Cart::new(), idle_tasks());
    assert!(html.starts_with("<!doctype html>"));
    for marker in ["<nav", "<header", "id=\"process\"", "id=\"agents\"", "id=\"about\"", "id=\"store\"", "<footer"] {
        assert!(html.contains(marker), "missing {marker}");
    }
}

#[test]
fn every_product_has_an_add_form() {
    let html = page(Cart::new(), idle_tasks());
    for product in &PRODUCTS {
        assert!(html.contains(&format!("data-product=\"{}\"", product.id)));
        assert!(html.contains(&format!("name=\"product_id\" value=\"{}\"", product.id)));
    }
    assert_eq!(html.matches(&format!("action=\"{}/cart/add\"", base())).count(), PRODUCTS.len());
    assert!(html.contains("$49"));
    assert!(html.contains("$29"));
}

#[test]
fn empty_cart_disables_checkout() {
    let html = page(Cart::new(), idle_tasks());
    assert!(html.contains("Your cart is empty."));
    assert!(html.contains("class=\"checkout disabled\""));
    assert!(html.contains("class=\"cart closed\""));
    assert!(!html.contains("class=\"badge\""));
    assert!(html.contains(&format!("action=\"{}/cart/toggle\"", base())));
}

#[test]
fn filled_cart_links_checkout_and_shows_totals() {
    let p1 = find_product("p1").cloned().unwrap();
    let p2 = find_product("p2").cloned().unwrap();
    let cart = Cart::new()
        .apply(CartAction::Add(p1))
        .apply(CartAction::Add(p2.clone()))
        .apply(CartAction::Add(p2));
    let html = page(cart, idle_tasks());
    assert!(html.contains("class=\"cart open\""));
    assert!(html.contains("aria-label=\"Open cart (3 items)\""));
    assert!(html.contains("data-total-cents=\"12700\""));
    assert!(html.contains("$127"));
    assert!(html.contains("$39 x 2"));
    assert!(html.contains("data-product=\"p2\" data-quantity=\"2\""));
    assert_eq!(html.matches(&format!("action=\"{}/cart/remove\"", base())).count(), 2);
    assert!(html.contains(&format!("class=\"checkout\" href=\"{CHECKOUT_URL}\"")));
}

#[test]
fn idle_agents_await_command() {
    let html = page(Cart::new(), idle_tasks());
    assert_eq!(html.matches("Awaiting Command").count(), AGENTS.len());
    assert_eq!(html.matches("Initialize").count(), AGENTS.len());
    for agent in &AGENTS {
        assert!(html.contains(&format!("action=\"{}/agents/{}/run\"", base(), agent.id)));
    }
    assert!(!html.contains("http-equiv=\"refresh\""));
}

#[test]
fn agent_states_render_their_views() {
    let (board, _) = TaskBoard::new().try_begin("task1").unwrap();
    let (board, _) = board.try_begin("task2").unwrap();
    let (board, _) = board.try_begin("task3").unwrap();
    let board = board
        .apply("task2", TaskEvent::Completed("## Ideas\n\n| a | b |\n|---|---|\n| 1 | 2 |".into()))
        .apply("task3", TaskEvent::Failed);
    let html = page(Cart::new(), board.tasks().to_vec());

    assert!(html.contains("data-status=\"Thinking\""));
    assert!(html.contains("Analyzing input parameters"));
    assert!(html.contains("disabled"));
    assert!(html.contains("<h2>Ideas</h2>"));
    assert!(html.contains("<table>"));
    assert!(html.contains("Error: Connection failed"));
    assert_eq!(html.matches("Rerun").count(), 2);
}

#[test]
fn busy_board_asks_browser_to_refresh() {
    let (board, _) = TaskBoard::new().try_begin("task1").unwrap();
    let html = page(Cart::new(), board.tasks().to_vec());
    assert!(html.contains("http-equiv=\"refresh\""));
}

#[test]
fn error_state_hides_stale_result() {
    let (board, _) = TaskBoard::new().try_begin("task1").unwrap();
    let board = board.apply("task1", TaskEvent::Completed("stale words".into()));
    let (board, _) = board.try_begin("task1").unwrap();
    let board = board.apply("task1", TaskEvent::Failed);
    let html = page(Cart::new(), board.tasks().to_vec());
    assert!(html.contains("Error: Connection failed"));
    assert!(!html.contains("stale words"));
}

#[test]
fn text_from_results_is_not_raw_html() {
    let (board, _) = TaskBoard::new().try_begin("task1").unwrap();
    let board = board.apply("task1", TaskEvent::Completed("<script>alert(1)</script> fine".into()));
    let html = page(Cart::new(), board.tasks().to_vec());
    assert!(!html.contains("<script>"));
    assert!(html.contains("fine"));
}

#[test]
fn render_or_fallback_passes_through_success() {
    let html = render_or_fallback(PageView { session_id: Uuid::nil(), cart: Cart::new(), tasks: idle_tasks() });
    assert!(html.contains("Lumina."));
    assert!(!html.contains("Error Loading Application"));
}

#[test]
fn panicking_render_serves_fallback() {
    let rendered = guarded(|| panic!("component exploded"));
    match &rendered {
        Err(RenderError::Panicked(msg)) => assert_eq!(msg, "component exploded"),
        Ok(_) => panic!("expected render failure"),
    }
    assert_eq!(or_fallback(rendered), FALLBACK_HTML);
}
