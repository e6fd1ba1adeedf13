mod catalog;
mod components;
mod config;
mod error;
mod llm;
mod render;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cfg = config::AppConfig::from_env();

    // No API key is demo mode, not an error; a malformed LLM setting is.
    let client = llm::ContentClient::from_env(cfg.timings.demo).expect("invalid LLM configuration");
    match client.model() {
        Some(model) => tracing::info!(%model, "LLM client initialized"),
        None => tracing::info!("API_KEY not set, agents run in demo mode"),
    }

    let state = state::AppState::new(Arc::new(client), cfg.timings, cfg.max_sessions);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = cfg.port, "lumina listening");
    axum::serve(listener, app).await.expect("server failed");
}
