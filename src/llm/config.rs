//! Generation client configuration parsed from environment variables.

use super::types::LlmError;

pub const API_KEY_VAR: &str = "API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    /// `None` leaves the request unbounded; only connection setup is capped.
    pub request_secs: Option<u64>,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed config from environment variables.
    ///
    /// Returns `Ok(None)` when `API_KEY` is unset or blank: the caller runs
    /// the generator in demo mode.
    ///
    /// Optional:
    /// - `LLM_MODEL`: default `gemini-2.5-flash`
    /// - `LLM_BASE_URL`: default Gemini v1beta endpoint
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    /// - `LLM_REQUEST_TIMEOUT_SECS`: unset means no request timeout
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigParse`] for a malformed base URL or request
    /// timeout.
    pub fn from_env() -> Result<Option<Self>, LlmError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`LlmConfig::from_env`] over an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`LlmConfig::from_env`].
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Option<Self>, LlmError> {
        let Some(api_key) = var(API_KEY_VAR).filter(|k| !k.trim().is_empty()) else {
            return Ok(None);
        };

        let model = var("LLM_MODEL")
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = parse_base_url(var("LLM_BASE_URL").as_deref())?;
        let request_secs = match var("LLM_REQUEST_TIMEOUT_SECS") {
            None => None,
            Some(raw) => Some(
                raw.parse::<u64>()
                    .map_err(|_| LlmError::ConfigParse(format!("invalid LLM_REQUEST_TIMEOUT_SECS: {raw}")))?,
            ),
        };
        let connect_secs = var("LLM_CONNECT_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_LLM_CONNECT_TIMEOUT_SECS);

        Ok(Some(Self { api_key, model, base_url, timeouts: LlmTimeouts { request_secs, connect_secs } }))
    }
}

fn parse_base_url(raw: Option<&str>) -> Result<String, LlmError> {
    let url = raw.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/');
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(url.to_string())
    } else {
        Err(LlmError::ConfigParse(format!("unsupported LLM_BASE_URL '{url}' (expected http or https)")))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
