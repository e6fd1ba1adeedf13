//! LLM — content generation for the agent board.
//!
//! DESIGN
//! ======
//! `ContentClient` dispatches to the Gemini HTTP client when an API key is
//! configured and to the offline demo generator otherwise. A missing key is
//! a mode switch, never an error.

pub mod config;
pub mod demo;
pub mod gemini;
pub mod types;

use std::time::Duration;

use config::LlmConfig;
pub use types::{ContentGenerator, LlmError};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete generator: remote Gemini or offline demo.
pub struct ContentClient {
    inner: Generator,
}

enum Generator {
    Gemini { client: gemini::GeminiClient, model: String },
    Demo(demo::DemoGenerator),
}

impl ContentClient {
    /// Build from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured value is malformed or the HTTP
    /// client fails to build.
    pub fn from_env(demo_delay: Duration) -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env()?, demo_delay)
    }

    /// Build from an optional typed config; `None` selects demo mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: Option<LlmConfig>, demo_delay: Duration) -> Result<Self, LlmError> {
        let inner = match config {
            Some(config) => {
                let model = config.model.clone();
                Generator::Gemini { client: gemini::GeminiClient::new(config)?, model }
            }
            None => Generator::Demo(demo::DemoGenerator::new(demo_delay)),
        };
        Ok(Self { inner })
    }

    /// Configured model name, or `None` in demo mode.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        match &self.inner {
            Generator::Gemini { model, .. } => Some(model),
            Generator::Demo(_) => None,
        }
    }
}

#[async_trait::async_trait]
impl ContentGenerator for ContentClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        match &self.inner {
            Generator::Gemini { client, .. } => client.generate(prompt).await,
            Generator::Demo(d) => d.generate(prompt).await,
        }
    }
}
