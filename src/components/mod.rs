//! Page components rendered server-side with Leptos.
//!
//! DESIGN
//! ======
//! Every control is a plain `<form method="post">` aimed at the session's
//! page routes, so the page works without a client bundle. The handler
//! mutates the session and redirects back; while any agent is busy the page
//! asks the browser to refresh so status changes and results keep arriving.

pub mod agent_panel;
pub mod layout;
pub mod store;

use leptos::prelude::*;
use uuid::Uuid;

use crate::services::agents::AgentTask;
use crate::services::cart::Cart;
use agent_panel::AgentPanel;
use layout::{About, Footer, Hero, Nav, Process};
use store::Store;

/// Seconds between reloads while an agent run is in progress.
pub const BUSY_REFRESH_SECS: &str = "1";

/// Base path of the form routes for one session.
#[must_use]
pub fn session_base(session_id: Uuid) -> String {
    format!("/sessions/{session_id}")
}

/// The whole document for one page session.
#[component]
pub fn Page(session_id: Uuid, cart: Cart, tasks: Vec<AgentTask>) -> impl IntoView {
    let base = session_base(session_id);
    let busy = tasks.iter().any(|t| t.status.is_busy());

    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                {busy.then(|| view! { <meta http-equiv="refresh" content=BUSY_REFRESH_SECS/> })}
                <title>"Lumina."</title>
            </head>
            <body>
                <Nav/>
                <Hero/>
                <Process/>
                <AgentPanel base=base.clone() tasks=tasks/>
                <About/>
                <Store base=base cart=cart/>
                <Footer/>
            </body>
        </html>
    }
}
