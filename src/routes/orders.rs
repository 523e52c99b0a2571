use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::Redirect};

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    routes::views::{
        AddressView, CartLineView, OrderView, TotalsView, address_views, cart_line_views,
        order_views,
    },
    services::{address_service, cart_service, order_service},
    state::AppState,
};

#[derive(Template, WebTemplate)]
#[template(path = "orders.html")]
pub struct OrdersTemplate {
    pub orders: Vec<OrderView>,
    pub addresses: Vec<AddressView>,
}

#[derive(Template, WebTemplate)]
#[template(path = "order_summary.html")]
pub struct OrderSummaryTemplate {
    pub lines: Vec<CartLineView>,
    pub totals: TotalsView,
    pub addresses: Vec<AddressView>,
}

/// Convert the cart into orders and land on the order history.
pub async fn checkout(State(state): State<AppState>, user: AuthUser) -> AppResult<Redirect> {
    order_service::checkout(&state, &user).await?;
    Ok(Redirect::to("/orders"))
}

pub async fn orders(State(state): State<AppState>, user: AuthUser) -> AppResult<OrdersTemplate> {
    let lines = order_service::list_orders(&state, &user).await?;
    let addresses = address_service::list_addresses(&state, &user).await?;

    Ok(OrdersTemplate {
        orders: order_views(&lines),
        addresses: address_views(addresses),
    })
}

/// Pre-checkout view: the same totals as the cart plus the delivery
/// addresses on file.
pub async fn order_summary(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<OrderSummaryTemplate> {
    let lines = cart_service::cart_lines(&state, &user).await?;
    let totals = cart_service::compute_totals(&lines);
    let addresses = address_service::list_addresses(&state, &user).await?;

    Ok(OrderSummaryTemplate {
        lines: cart_line_views(&lines),
        totals: totals.into(),
        addresses: address_views(addresses),
    })
}
