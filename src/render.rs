//! Server-side page rendering.
//!
//! DESIGN
//! ======
//! `render_page` renders the Leptos [`Page`] component for one session
//! snapshot to an HTML string. Leptos escapes every interpolated value. A
//! panic while rendering is caught once at the page root by
//! `render_or_fallback`, which serves a static error document instead.

use std::panic::{AssertUnwindSafe, catch_unwind};

use leptos::prelude::*;
use tracing::warn;
use uuid::Uuid;

use crate::components::Page;
use crate::services::agents::AgentTask;
use crate::services::cart::Cart;

pub const FALLBACK_HTML: &str = r#"<!doctype html><html><body><div style="padding: 20px; color: red;"><h1>Error Loading Application</h1><p>See server logs for details.</p></div></body></html>"#;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("page render panicked: {0}")]
    Panicked(String),
}

impl crate::error::ErrorCode for RenderError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Panicked(_) => "E_RENDER",
        }
    }
}

/// Everything the page shows for one session.
#[derive(Debug, Clone)]
pub struct PageView {
    pub session_id: Uuid,
    pub cart: Cart,
    pub tasks: Vec<AgentTask>,
}

/// Render the page, or the static fallback document if rendering fails.
#[must_use]
pub fn render_or_fallback(page: PageView) -> String {
    or_fallback(render_page(page))
}

/// Render the full document.
///
/// # Errors
///
/// Returns [`RenderError::Panicked`] if a component panics.
pub fn render_page(page: PageView) -> Result<String, RenderError> {
    guarded(move || {
        let PageView { session_id, cart, tasks } = page;
        let body = Owner::new().with(|| view! { <Page session_id=session_id cart=cart tasks=tasks/> }.to_html());
        format!("<!doctype html>\n{body}")
    })
}

fn guarded(render: impl FnOnce() -> String) -> Result<String, RenderError> {
    catch_unwind(AssertUnwindSafe(render)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        RenderError::Panicked(message)
    })
}

fn or_fallback(rendered: Result<String, RenderError>) -> String {
    match rendered {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "render: page failed, serving fallback");
            FALLBACK_HTML.to_string()
        }
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
