//! Static storefront catalog: products, agent task definitions, checkout link.
//!
//! Everything here is fixed at process start and never mutated.

use serde::Serialize;

/// Hosted checkout page. Carries no cart contents.
pub const CHECKOUT_URL: &str = "https://buy.stripe.com/test_eVq5kCfUW55C0LXduf4ZG00";

// =============================================================================
// PRODUCTS
// =============================================================================

/// A purchasable digital product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Price in whole cents.
    pub price_cents: u64,
    pub image: &'static str,
    pub tags: &'static [&'static str],
}

pub static PRODUCTS: [Product; 4] = [
    Product {
        id: "p1",
        title: "Freelance OS 2.0 (Notion)",
        description: "The ultimate dashboard for client management, invoices, and AI project planning.",
        price_cents: 4_900,
        image: "https://picsum.photos/400/300?grayscale&blur=2",
        tags: &["Notion", "System"],
    },
    Product {
        id: "p2",
        title: "2025 AI Content Workflow",
        description: "A complete system of prompts and automations to scale your content marketing.",
        price_cents: 3_900,
        image: "https://picsum.photos/400/301?grayscale&blur=2",
        tags: &["AI", "Marketing"],
    },
    Product {
        id: "p3",
        title: "Niche Community Builder",
        description: "Guide + Templates for launching a profitable paid community in 2025.",
        price_cents: 5_900,
        image: "https://picsum.photos/400/302?grayscale&blur=2",
        tags: &["Community", "Guide"],
    },
    Product {
        id: "p4",
        title: "Digital Product Launchpad",
        description: "Checklists and roadmaps to go from idea to first sale in 7 days.",
        price_cents: 2_900,
        image: "https://picsum.photos/400/303?grayscale&blur=2",
        tags: &["Business", "Starter"],
    },
];

/// Look up a catalog product by identifier.
#[must_use]
pub fn find_product(id: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == id)
}

/// Format whole cents as a dollar amount, dropping `.00` for round prices.
#[must_use]
pub fn format_price(cents: u64) -> String {
    let dollars = cents / 100;
    let rem = cents % 100;
    if rem == 0 { format!("${dollars}") } else { format!("${dollars}.{rem:02}") }
}

// =============================================================================
// AGENT TASKS
// =============================================================================

/// Fixed definition of one agent task on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,
}

pub const BOOK_OUTLINE_PROMPT: &str = "Generate a professional, clean 7-chapter outline for a beginner eBook titled 'The Absolute Beginner's Guide to Stress-Free Small Business Bookkeeping.'

Structure requirements:
- Cover basic income/expense tracking.
- Essential tax compliance for small startups.
- A final actionable checklist.
- Tone: Professional, encouraging, and actionable.

Output format: Markdown with clear headers.";

pub const PRODUCT_IDEAS_PROMPT: &str = "Based on the latest 2025 market analysis, generate 10 \"ready-to-launch\" digital product ideas.

Use this context for high-performing trends:
- **Online Courses**: \"AI for small business\", \"Freelance writing basics\" (Micro-learning).
- **Templates**: Notion dashboards for specific niches (e.g., \"Budget planner for college students\", \"Content Calendar for Realtors\").
- **Stock Media**: Authentic B-roll, Lo-fi background music packs.
- **AI Tools**: Prompt packs for specific industries.

Output as a structured Markdown table with columns:
| Product Idea | Target Niche | Why It Sells (2025) | Est. Price |";

pub const MARKETING_STRATEGY_PROMPT: &str = "Act as a senior growth hacker. Generate a \"Nonstop Sales\" launch sequence for a digital product in 2025.

Include:
1. **The Hook**: A controversial or high-curiosity social media post (LinkedIn/X style).
2. **The Funnel**: A simple low-ticket to high-ticket value ladder.
3. **The Scarcity**: A 48-hour bonus offer idea.

Output as clean Markdown.";

/// Board order matters: the first entry is the one auto-run after mount.
pub const AGENTS: [AgentSpec; 3] = [
    AgentSpec {
        id: "task1",
        name: "Agent Alpha",
        description: "Expert Book Editor",
        prompt: BOOK_OUTLINE_PROMPT,
    },
    AgentSpec {
        id: "task2",
        name: "Agent Beta",
        description: "Market Trend Analyst",
        prompt: PRODUCT_IDEAS_PROMPT,
    },
    AgentSpec {
        id: "task3",
        name: "Agent Gamma",
        description: "Growth Strategist",
        prompt: MARKETING_STRATEGY_PROMPT,
    },
];

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
