//! Cart service — the storefront's cart state and its reducer.
//!
//! DESIGN
//! ======
//! `Cart` is a plain value. Every mutation goes through [`Cart::apply`],
//! which consumes the current snapshot and returns the next one, so the
//! state machine is testable without a session or a renderer.
//!
//! Invariants: at most one item per product id, every quantity is >= 1,
//! items stay in the order they were first added.

use serde::Serialize;

use crate::catalog::{CHECKOUT_URL, Product};

// =============================================================================
// TYPES
// =============================================================================

/// A product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    #[must_use]
    pub fn line_total_cents(&self) -> u64 {
        self.product.price_cents * u64::from(self.quantity)
    }
}

/// Actions accepted by the cart reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of a product and open the panel.
    Add(Product),
    /// Drop the product's line entirely. No-op when absent.
    Remove(String),
    /// Flip panel visibility.
    Toggle,
    /// Hide the panel.
    Close,
}

/// Where the checkout button leads for the current cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Checkout {
    /// Open the hosted checkout page in a new browsing context.
    Open { url: &'static str },
    /// Empty cart: the button is inert.
    Disabled,
}

/// Cart contents plus the panel visibility flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    items: Vec<CartItem>,
    open: bool,
}

// =============================================================================
// REDUCER
// =============================================================================

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action and return the next snapshot.
    #[must_use]
    pub fn apply(mut self, action: CartAction) -> Self {
        match action {
            CartAction::Add(product) => {
                if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
                    item.quantity = item.quantity.saturating_add(1);
                } else {
                    self.items.push(CartItem { product, quantity: 1 });
                }
                self.open = true;
            }
            CartAction::Remove(product_id) => {
                self.items.retain(|i| i.product.id != product_id);
            }
            CartAction::Toggle => self.open = !self.open,
            CartAction::Close => self.open = false,
        }
        self
    }

    // =========================================================================
    // DERIVED VIEWS
    // =========================================================================

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of price × quantity, in cents.
    #[must_use]
    pub fn total_cents(&self) -> u64 {
        self.items.iter().map(CartItem::line_total_cents).sum()
    }

    /// Sum of quantities.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    #[must_use]
    pub fn checkout(&self) -> Checkout {
        if self.is_empty() { Checkout::Disabled } else { Checkout::Open { url: CHECKOUT_URL } }
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
