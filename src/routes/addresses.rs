use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    forms::{AddressForm, FieldError},
    middleware::auth::AuthUser,
    services::address_service,
    state::AppState,
};

#[derive(Template, WebTemplate)]
#[template(path = "address_add.html")]
pub struct AddressAddTemplate {
    pub form: AddressForm,
    pub errors: Vec<FieldError>,
}

#[derive(Template, WebTemplate)]
#[template(path = "address_edit.html")]
pub struct AddressEditTemplate {
    pub address_id: Uuid,
    pub form: AddressForm,
    pub errors: Vec<FieldError>,
}

pub async fn add_page(_user: AuthUser) -> AddressAddTemplate {
    AddressAddTemplate {
        form: AddressForm::default(),
        errors: Vec::new(),
    }
}

pub async fn add(
    State(state): State<AppState>,
    user: AuthUser,
    Form(form): Form<AddressForm>,
) -> AppResult<Response> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Ok(AddressAddTemplate { form, errors }.into_response());
    }

    address_service::create_address(&state, &user, &form).await?;
    Ok(Redirect::to("/cart").into_response())
}

pub async fn edit_page(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<AddressEditTemplate> {
    let address = address_service::get_owned_address(&state, &user, id).await?;
    Ok(AddressEditTemplate {
        address_id: address.id,
        form: AddressForm {
            city: address.city,
            street: address.street,
            first_name: address.first_name,
            last_name: address.last_name,
            name_for_engraving: address.name_for_engraving,
            phone: address.phone,
        },
        errors: Vec::new(),
    })
}

pub async fn edit(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Form(form): Form<AddressForm>,
) -> AppResult<Response> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Ok(AddressEditTemplate {
            address_id: id,
            form,
            errors,
        }
        .into_response());
    }

    address_service::update_address(&state, &user, id, &form).await?;
    Ok(Redirect::to("/order-summary").into_response())
}

pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Redirect> {
    address_service::delete_address(&state, &user, id).await?;
    Ok(Redirect::to("/profile"))
}
