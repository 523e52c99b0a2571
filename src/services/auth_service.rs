use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as User},
    error::{AppError, AppResult},
    forms::{SignupForm, UserEditForm},
    state::AppState,
};

pub enum SignupOutcome {
    Created(User),
    EmailTaken,
}

pub enum UpdateOutcome {
    Updated(User),
    EmailTaken,
}

fn none_if_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub async fn signup_user(state: &AppState, form: &SignupForm) -> AppResult<SignupOutcome> {
    let email = form.email.trim().to_lowercase();

    let exists = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    if exists.is_some() {
        return Ok(SignupOutcome::EmailTaken);
    }

    let password_hash = hash_password(&form.password)?;

    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        password_hash: Set(password_hash),
        first_name: Set(none_if_blank(&form.first_name)),
        last_name: Set(none_if_blank(&form.last_name)),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(user_id = %user.id, "user signed up");
    Ok(SignupOutcome::Created(user))
}

/// Check credentials. Returns `None` for an unknown email or a wrong
/// password; the two cases are indistinguishable to the caller.
pub async fn verify_login(
    state: &AppState,
    email: &str,
    password: &str,
) -> AppResult<Option<User>> {
    let user = Users::find()
        .filter(UserCol::Email.eq(email.trim().to_lowercase()))
        .one(&state.orm)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Ok(None),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Ok(None);
    }

    Ok(Some(user))
}

pub async fn get_user(state: &AppState, user_id: Uuid) -> AppResult<User> {
    Users::find_by_id(user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn update_user(
    state: &AppState,
    user_id: Uuid,
    form: &UserEditForm,
) -> AppResult<UpdateOutcome> {
    let email = form.email.trim().to_lowercase();

    // Same duplicate check as signup, except the user's own row is allowed
    // to keep its email.
    let taken = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .filter(UserCol::Id.ne(user_id))
        .one(&state.orm)
        .await?;
    if taken.is_some() {
        return Ok(UpdateOutcome::EmailTaken);
    }

    let user = get_user(state, user_id).await?;

    let mut active: UserActive = user.into();
    active.email = Set(email);
    active.first_name = Set(none_if_blank(&form.first_name));
    active.last_name = Set(none_if_blank(&form.last_name));
    let user = active.update(&state.orm).await?;

    Ok(UpdateOutcome::Updated(user))
}

/// Delete the user row; addresses, cart lines and orders go with it via
/// foreign key cascade.
pub async fn delete_user(state: &AppState, user_id: Uuid) -> AppResult<()> {
    let user = get_user(state, user_id).await?;
    user.delete(&state.orm).await?;
    tracing::info!(%user_id, "user deleted");
    Ok(())
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}
