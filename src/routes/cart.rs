use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::Redirect,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    routes::views::{AddressView, CartLineView, TotalsView, address_views, cart_line_views},
    services::{address_service, cart_service},
    state::AppState,
};

#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub lines: Vec<CartLineView>,
    pub totals: TotalsView,
    pub addresses: Vec<AddressView>,
}

pub async fn cart(State(state): State<AppState>, user: AuthUser) -> AppResult<CartTemplate> {
    let lines = cart_service::cart_lines(&state, &user).await?;
    let totals = cart_service::compute_totals(&lines);
    let addresses = address_service::list_addresses(&state, &user).await?;

    Ok(CartTemplate {
        lines: cart_line_views(&lines),
        totals: totals.into(),
        addresses: address_views(addresses),
    })
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Redirect> {
    cart_service::add_to_cart(&state, &user, product_id).await?;
    Ok(Redirect::to("/cart"))
}

pub async fn plus_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(cart_id): Path<Uuid>,
) -> AppResult<Redirect> {
    cart_service::plus_cart(&state, &user, cart_id).await?;
    Ok(Redirect::to("/cart"))
}

pub async fn minus_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(cart_id): Path<Uuid>,
) -> AppResult<Redirect> {
    cart_service::minus_cart(&state, &user, cart_id).await?;
    Ok(Redirect::to("/cart"))
}

pub async fn remove_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(cart_id): Path<Uuid>,
) -> AppResult<Redirect> {
    cart_service::remove_cart(&state, &user, cart_id).await?;
    Ok(Redirect::to("/cart"))
}
