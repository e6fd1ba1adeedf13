//! Offline demo generator used when no API key is configured.
//!
//! Never contacts the network and never fails. Marketing launch prompts get
//! a canned sample; everything else gets a configuration hint.

use std::time::Duration;

use super::types::{ContentGenerator, LlmError};

pub const DEFAULT_DEMO_DELAY: Duration = Duration::from_millis(2000);

pub const MISSING_KEY_MESSAGE: &str =
    "API Key missing. Please configure process.env.API_KEY to see real AI generation.";

pub const MARKETING_SAMPLE: &str = r#"## 🚀 Nonstop Sales Launch Sequence (Demo Output)

### 1. The Hook (LinkedIn/X)
**"Stop tracking expenses. Start tracking profit."**
Most freelancers are bookkeeping like it's 1999. I just automated my entire tax year in 15 minutes. Here's the exact stack I used (and why your accountant might hate it). 🧵👇

### 2. The Value Ladder
*   **Lead Magnet:** "The 15-Minute Tax Audit" (Free PDF Checklist)
*   **Tripwire ($29):** "Freelance Finance Dashboard" (Notion Template)
*   **Core Offer ($199):** "Small Business Financial Automation Mastery" (Video Course)

### 3. The Scarcity (48-Hour Bonus)
*"Buy the dashboard in the next 48 hours and get my 'Audit-Proof Receipt Organizer' custom GPT for FREE."*

*(Add your API Key to see real-time AI generation)*"#;

pub struct DemoGenerator {
    delay: Duration,
}

impl DemoGenerator {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for DemoGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_DEMO_DELAY)
    }
}

/// Canned reply for `prompt`.
#[must_use]
pub fn demo_response(prompt: &str) -> &'static str {
    let lower = prompt.to_lowercase();
    if lower.contains("marketing") || lower.contains("nonstop sales") {
        MARKETING_SAMPLE
    } else {
        MISSING_KEY_MESSAGE
    }
}

#[async_trait::async_trait]
impl ContentGenerator for DemoGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        tokio::time::sleep(self.delay).await;
        Ok(demo_response(prompt).to_string())
    }
}

#[cfg(test)]
#[path = "demo_test.rs"]
mod tests;
