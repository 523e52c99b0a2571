use sea_orm::{EntityTrait, QueryOrder};

use crate::{
    entity::balance_bikes::{Column as BikeCol, Entity as BalanceBikes, Model as BalanceBike},
    error::AppResult,
    state::AppState,
};

/// The whole catalogue, ordered by color. No filtering, no pagination.
pub async fn list_bikes(state: &AppState) -> AppResult<Vec<BalanceBike>> {
    let bikes = BalanceBikes::find()
        .order_by_asc(BikeCol::Color)
        .all(&state.orm)
        .await?;
    Ok(bikes)
}
