//! Agent board: one card per task with its run control and console.
//!
//! SYSTEM CONTEXT
//! ==============
//! Run buttons post to `{base}/agents/{task_id}/run`. Results are model
//! Markdown rendered to HTML with raw HTML events dropped.

use leptos::prelude::*;
use pulldown_cmark::{Event, Options, Parser, html};

use crate::services::agents::{AgentStatus, AgentTask};

#[component]
pub fn AgentPanel(base: String, tasks: Vec<AgentTask>) -> impl IntoView {
    let cards = tasks
        .into_iter()
        .map(|task| view! { <AgentCard base=base.clone() task=task/> })
        .collect::<Vec<_>>();

    view! {
        <section id="agents">
            <h2>"Multi-Agent Workforce"</h2>
            {cards}
        </section>
    }
}

#[component]
fn AgentCard(base: String, task: AgentTask) -> impl IntoView {
    let action = format!("{base}/agents/{}/run", task.id);
    let busy = task.status.is_busy();
    let status = format!("{:?}", task.status);
    let console = match task.status {
        AgentStatus::Idle => Some(view! { <p>"Awaiting Command"</p> }.into_any()),
        AgentStatus::Thinking => Some(view! { <p>"> Analyzing input parameters..."</p> }.into_any()),
        AgentStatus::Error => Some(
            view! { <div class="error">"Error: Connection failed. Check API configuration."</div> }.into_any(),
        ),
        AgentStatus::Generating | AgentStatus::Completed => None,
    };
    let result = task.visible_result().map(|text| {
        let rendered = render_markdown_html(text);
        view! { <div class="result" inner_html=rendered></div> }
    });

    view! {
        <article class="agent" data-task=task.id data-status=status>
            <h3>{task.name}</h3>
            <p>{task.description}</p>
            <form method="post" action=action>
                <button type="submit" disabled=busy>{task.status.action_label()}</button>
            </form>
            <div class="console">{console}{result}</div>
        </article>
    }
}

/// Render model Markdown to HTML, dropping raw HTML from the model output.
#[must_use]
pub fn render_markdown_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(_) | Event::InlineHtml(_) => None,
        other => Some(other),
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
#[path = "agent_panel_test.rs"]
mod tests;
