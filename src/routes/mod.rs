use axum::{Router, routing::get};

use crate::state::AppState;

pub mod addresses;
pub mod auth;
pub mod cart;
pub mod health;
pub mod orders;
pub mod pages;
pub mod profile;
pub mod views;

// Build the router without binding state; it is provided at the top level.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/contacts", get(pages::contacts))
        .route("/catalogue", get(pages::catalogue))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout).post(auth::logout))
        .route("/profile", get(profile::profile))
        .route("/profile/edit", get(profile::edit_page).post(profile::edit))
        .route(
            "/profile/delete",
            get(profile::delete_page).post(profile::delete),
        )
        .route("/address/add", get(addresses::add_page).post(addresses::add))
        .route(
            "/address/edit/{id}",
            get(addresses::edit_page).post(addresses::edit),
        )
        .route("/address/remove/{id}", get(addresses::remove))
        .route("/cart", get(cart::cart))
        .route("/cart/add/{product_id}", get(cart::add_to_cart))
        .route("/cart/plus/{cart_id}", get(cart::plus_cart))
        .route("/cart/minus/{cart_id}", get(cart::minus_cart))
        .route("/cart/remove/{cart_id}", get(cart::remove_cart))
        .route("/checkout", get(orders::checkout))
        .route("/orders", get(orders::orders))
        .route("/order-summary", get(orders::order_summary))
}
