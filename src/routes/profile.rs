use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::{
    error::AppResult,
    forms::{FieldError, UserEditForm},
    middleware::auth::{AuthUser, clear_session},
    routes::views::{AddressView, OrderView, address_views, order_views},
    services::{
        address_service,
        auth_service::{self, UpdateOutcome},
        order_service,
    },
    state::AppState,
};

#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub email: String,
    pub addresses: Vec<AddressView>,
    pub orders: Vec<OrderView>,
}

#[derive(Template, WebTemplate)]
#[template(path = "user_edit.html")]
pub struct UserEditTemplate {
    pub form: UserEditForm,
    pub errors: Vec<FieldError>,
}

#[derive(Template, WebTemplate)]
#[template(path = "user_delete.html")]
pub struct UserDeleteTemplate {
    pub email: String,
}

/// The user's addresses and order history, newest order first.
pub async fn profile(State(state): State<AppState>, user: AuthUser) -> AppResult<ProfileTemplate> {
    let account = auth_service::get_user(&state, user.user_id).await?;
    let addresses = address_service::list_addresses(&state, &user).await?;
    let orders = order_service::list_orders(&state, &user).await?;

    Ok(ProfileTemplate {
        email: account.email,
        addresses: address_views(addresses),
        orders: order_views(&orders),
    })
}

pub async fn edit_page(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<UserEditTemplate> {
    let account = auth_service::get_user(&state, user.user_id).await?;
    Ok(UserEditTemplate {
        form: UserEditForm {
            email: account.email,
            first_name: account.first_name.unwrap_or_default(),
            last_name: account.last_name.unwrap_or_default(),
        },
        errors: Vec::new(),
    })
}

pub async fn edit(
    State(state): State<AppState>,
    user: AuthUser,
    Form(form): Form<UserEditForm>,
) -> AppResult<Response> {
    let mut errors = form.validate();
    if errors.is_empty() {
        match auth_service::update_user(&state, user.user_id, &form).await? {
            UpdateOutcome::Updated(_) => return Ok(Redirect::to("/profile").into_response()),
            UpdateOutcome::EmailTaken => {
                errors.push(FieldError {
                    field: "email",
                    message: "This email is already taken".into(),
                });
            }
        }
    }

    Ok(UserEditTemplate { form, errors }.into_response())
}

pub async fn delete_page(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<UserDeleteTemplate> {
    let account = auth_service::get_user(&state, user.user_id).await?;
    Ok(UserDeleteTemplate {
        email: account.email,
    })
}

/// Delete the account and end the session.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    session: Session,
) -> AppResult<Redirect> {
    auth_service::delete_user(&state, user.user_id).await?;
    clear_session(&session).await?;
    Ok(Redirect::to("/"))
}
