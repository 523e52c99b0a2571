use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::{
    entity::addresses::{
        ActiveModel as AddressActive, Column as AddressCol, Entity as Addresses, Model as Address,
    },
    error::{AppError, AppResult},
    forms::AddressForm,
    middleware::auth::AuthUser,
    state::AppState,
};

pub async fn list_addresses(state: &AppState, user: &AuthUser) -> AppResult<Vec<Address>> {
    let addresses = Addresses::find()
        .filter(AddressCol::UserId.eq(user.user_id))
        .order_by_asc(AddressCol::CreatedAt)
        .all(&state.orm)
        .await?;
    Ok(addresses)
}

pub async fn create_address(
    state: &AppState,
    user: &AuthUser,
    form: &AddressForm,
) -> AppResult<Address> {
    let address = AddressActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        city: Set(form.city.trim().to_string()),
        street: Set(form.street.trim().to_string()),
        first_name: Set(form.first_name.trim().to_string()),
        last_name: Set(form.last_name.trim().to_string()),
        name_for_engraving: Set(form.name_for_engraving.trim().to_string()),
        phone: Set(form.phone.trim().to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(address)
}

/// Load an address scoped to its owner. An address that exists but belongs
/// to another user is indistinguishable from a missing one.
pub async fn get_owned_address(
    state: &AppState,
    user: &AuthUser,
    address_id: Uuid,
) -> AppResult<Address> {
    Addresses::find()
        .filter(
            Condition::all()
                .add(AddressCol::Id.eq(address_id))
                .add(AddressCol::UserId.eq(user.user_id)),
        )
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn update_address(
    state: &AppState,
    user: &AuthUser,
    address_id: Uuid,
    form: &AddressForm,
) -> AppResult<Address> {
    let address = get_owned_address(state, user, address_id).await?;

    let mut active: AddressActive = address.into();
    active.city = Set(form.city.trim().to_string());
    active.street = Set(form.street.trim().to_string());
    active.first_name = Set(form.first_name.trim().to_string());
    active.last_name = Set(form.last_name.trim().to_string());
    active.name_for_engraving = Set(form.name_for_engraving.trim().to_string());
    active.phone = Set(form.phone.trim().to_string());
    let address = active.update(&state.orm).await?;

    Ok(address)
}

pub async fn delete_address(state: &AppState, user: &AuthUser, address_id: Uuid) -> AppResult<()> {
    let address = get_owned_address(state, user, address_id).await?;
    address.delete(&state.orm).await?;
    Ok(())
}
