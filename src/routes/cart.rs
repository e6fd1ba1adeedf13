//! Catalog and cart routes.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Json, Redirect, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::session_error_to_api;
use crate::catalog::{PRODUCTS, Product};
use crate::error::ApiError;
use crate::services::cart::{Cart, CartItem, Checkout};
use crate::services::session;
use crate::state::AppState;

/// Cart snapshot with its derived values.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub open: bool,
    pub count: u64,
    pub total_cents: u64,
    pub checkout: Checkout,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            open: cart.is_open(),
            count: cart.count(),
            total_cents: cart.total_cents(),
            checkout: cart.checkout(),
            items: cart.items().to_vec(),
        }
    }
}

#[derive(Deserialize)]
pub struct AddItemBody {
    pub product_id: String,
}

/// `GET /api/products` — the static catalog.
pub async fn list_products() -> Json<&'static [Product]> {
    Json(PRODUCTS.as_slice())
}

/// `GET /api/sessions/:id/cart` — current cart.
pub async fn get_cart(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<CartResponse>, ApiError> {
    let session = session::get(&state, id).await.map_err(session_error_to_api)?;
    Ok(Json(session.cart().into()))
}

/// `POST /api/sessions/:id/cart/items` — add one unit of a product.
pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AddItemBody>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = session::add_to_cart(&state, id, &body.product_id)
        .await
        .map_err(session_error_to_api)?;
    Ok(Json(cart.into()))
}

/// `DELETE /api/sessions/:id/cart/items/:product_id` — drop a product line.
pub async fn remove_item(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(Uuid, String)>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = session::remove_from_cart(&state, id, &product_id)
        .await
        .map_err(session_error_to_api)?;
    Ok(Json(cart.into()))
}

/// `POST /api/sessions/:id/cart/toggle` — flip panel visibility.
pub async fn toggle(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<CartResponse>, ApiError> {
    let cart = session::toggle_cart(&state, id)
        .await
        .map_err(session_error_to_api)?;
    Ok(Json(cart.into()))
}

/// `POST /api/sessions/:id/cart/close` — hide the panel.
pub async fn close(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<CartResponse>, ApiError> {
    let cart = session::close_cart(&state, id)
        .await
        .map_err(session_error_to_api)?;
    Ok(Json(cart.into()))
}

/// `GET /api/sessions/:id/checkout` — 303 to the hosted checkout page, or
/// 409 while the cart is empty.
pub async fn checkout(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match session::checkout_url(&state, id).await {
        Ok(url) => Redirect::to(url).into_response(),
        Err(e) => session_error_to_api(e).into_response(),
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
