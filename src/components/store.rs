//! Product grid and cart panel.
//!
//! Add, remove, toggle and close post to `{base}/cart/...`; checkout links
//! straight to the hosted page and carries no cart contents.

use leptos::prelude::*;

use crate::catalog::{PRODUCTS, Product, format_price};
use crate::services::cart::{Cart, CartItem, Checkout};

#[component]
pub fn Store(base: String, cart: Cart) -> impl IntoView {
    let count = cart.count();
    let toggle_label = format!("Open cart ({count} items)");
    let badge = (count > 0).then(|| view! { <span class="badge">{count.to_string()}</span> });
    let products = PRODUCTS
        .iter()
        .map(|product| view! { <ProductCard base=base.clone() product=product.clone()/> })
        .collect::<Vec<_>>();

    view! {
        <section id="store">
            <h2>"Digital Assets"</h2>
            <form method="post" action=format!("{base}/cart/toggle")>
                <button type="submit" class="cart-toggle" aria-label=toggle_label>
                    "Cart"
                    {badge}
                </button>
            </form>
            <div class="products">{products}</div>
            <CartPanel base=base cart=cart/>
        </section>
    }
}

#[component]
fn ProductCard(base: String, product: Product) -> impl IntoView {
    let add_label = format!("Add {} to cart", product.title);
    let tags = product
        .tags
        .iter()
        .map(|tag| view! { <span class="tag">{*tag}</span> })
        .collect::<Vec<_>>();

    view! {
        <div class="product" data-product=product.id>
            <img src=product.image alt=product.title loading="lazy"/>
            {tags}
            <h3>{product.title}</h3>
            <p>{product.description}</p>
            <span class="price">{format_price(product.price_cents)}</span>
            <form method="post" action=format!("{base}/cart/add")>
                <input type="hidden" name="product_id" value=product.id/>
                <button type="submit" aria-label=add_label>"+"</button>
            </form>
        </div>
    }
}

#[component]
fn CartPanel(base: String, cart: Cart) -> impl IntoView {
    let class = if cart.is_open() { "cart open" } else { "cart closed" };
    let total = format_price(cart.total_cents());
    let lines = if cart.is_empty() {
        view! { <p>"Your cart is empty."</p> }.into_any()
    } else {
        let items = cart
            .items()
            .iter()
            .map(|item| view! { <CartLine base=base.clone() item=item.clone()/> })
            .collect::<Vec<_>>();
        view! { <ul>{items}</ul> }.into_any()
    };
    let checkout = match cart.checkout() {
        Checkout::Open { url } => view! {
            <a class="checkout" href=url target="_blank" rel="noopener noreferrer">"Checkout Securely"</a>
        }
        .into_any(),
        Checkout::Disabled => view! {
            <a class="checkout disabled" aria-disabled="true">"Checkout Securely"</a>
        }
        .into_any(),
    };

    view! {
        <aside class=class data-total-cents=cart.total_cents().to_string()>
            <h3>"Your Cart"</h3>
            <form method="post" action=format!("{base}/cart/close")>
                <button type="submit" aria-label="Close cart">"Close"</button>
            </form>
            {lines}
            <div class="total">"Total " <strong>{total}</strong></div>
            {checkout}
        </aside>
    }
}

#[component]
fn CartLine(base: String, item: CartItem) -> impl IntoView {
    let id = item.product.id;
    let line = format!("{} x {}", format_price(item.product.price_cents), item.quantity);

    view! {
        <li data-product=id data-quantity=item.quantity.to_string()>
            <span>{item.product.title}</span>
            <span>{line}</span>
            <form method="post" action=format!("{base}/cart/remove")>
                <input type="hidden" name="product_id" value=id/>
                <button type="submit">"Remove"</button>
            </form>
        </li>
    }
}
