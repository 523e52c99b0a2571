use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::{
    entity::{
        balance_bikes::{Entity as BalanceBikes, Model as BalanceBike},
        cart_items::{
            ActiveModel as CartActive, Column as CartCol, Entity as CartItems, Model as CartItem,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    state::AppState,
};

/// A cart row joined with its bike.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub item: CartItem,
    pub bike: BalanceBike,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub amount: i64,
    pub shipping_amount: i64,
    pub total_amount: i64,
}

/// `amount = Σ quantity × price`. Shipping is always zero.
pub fn compute_totals(lines: &[CartLine]) -> CartTotals {
    let amount: i64 = lines
        .iter()
        .map(|line| i64::from(line.item.quantity) * line.bike.price)
        .sum();
    let shipping_amount = 0;
    CartTotals {
        amount,
        shipping_amount,
        total_amount: amount + shipping_amount,
    }
}

/// The user's cart in insertion order, each line joined with its bike.
pub async fn cart_lines(state: &AppState, user: &AuthUser) -> AppResult<Vec<CartLine>> {
    let rows = CartItems::find()
        .filter(CartCol::UserId.eq(user.user_id))
        .order_by_asc(CartCol::CreatedAt)
        .find_also_related(BalanceBikes)
        .all(&state.orm)
        .await?;

    let mut lines = Vec::with_capacity(rows.len());
    for (item, bike) in rows {
        let bike = bike.ok_or(AppError::NotFound)?;
        lines.push(CartLine { item, bike });
    }
    Ok(lines)
}

/// First add inserts a line with quantity 1; a repeat add increments it.
/// The existence check and the write are separate statements, so two
/// concurrent adds for the same product can race.
pub async fn add_to_cart(state: &AppState, user: &AuthUser, product_id: Uuid) -> AppResult<CartItem> {
    let bike = BalanceBikes::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let existing = CartItems::find()
        .filter(
            Condition::all()
                .add(CartCol::UserId.eq(user.user_id))
                .add(CartCol::ProductId.eq(bike.id)),
        )
        .one(&state.orm)
        .await?;

    let item = match existing {
        Some(item) => {
            let quantity = item.quantity + 1;
            let mut active: CartActive = item.into();
            active.quantity = Set(quantity);
            active.update(&state.orm).await?
        }
        None => {
            CartActive {
                id: Set(Uuid::new_v4()),
                user_id: Set(user.user_id),
                product_id: Set(bike.id),
                quantity: Set(1),
                created_at: NotSet,
            }
            .insert(&state.orm)
            .await?
        }
    };

    Ok(item)
}

async fn get_owned_line(state: &AppState, user: &AuthUser, cart_id: Uuid) -> AppResult<CartItem> {
    CartItems::find()
        .filter(
            Condition::all()
                .add(CartCol::Id.eq(cart_id))
                .add(CartCol::UserId.eq(user.user_id)),
        )
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

/// Increment a line, but never past the bike's remaining stock. At the
/// limit this is a silent no-op.
pub async fn plus_cart(state: &AppState, user: &AuthUser, cart_id: Uuid) -> AppResult<()> {
    let item = get_owned_line(state, user, cart_id).await?;
    let bike = BalanceBikes::find_by_id(item.product_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if item.quantity < bike.quantity_available {
        let quantity = item.quantity + 1;
        let mut active: CartActive = item.into();
        active.quantity = Set(quantity);
        active.update(&state.orm).await?;
    }

    Ok(())
}

/// Decrement a line; at quantity 1 the row is deleted instead of being
/// persisted at zero.
pub async fn minus_cart(state: &AppState, user: &AuthUser, cart_id: Uuid) -> AppResult<()> {
    let item = get_owned_line(state, user, cart_id).await?;

    if item.quantity == 1 {
        item.delete(&state.orm).await?;
    } else {
        let quantity = item.quantity - 1;
        let mut active: CartActive = item.into();
        active.quantity = Set(quantity);
        active.update(&state.orm).await?;
    }

    Ok(())
}

pub async fn remove_cart(state: &AppState, user: &AuthUser, cart_id: Uuid) -> AppResult<()> {
    let item = get_owned_line(state, user, cart_id).await?;
    item.delete(&state.orm).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn line(quantity: i32, price: i64) -> CartLine {
        let now = Utc::now().fixed_offset();
        CartLine {
            item: CartItem {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                product_id: Uuid::new_v4(),
                quantity,
                created_at: now,
            },
            bike: BalanceBike {
                id: Uuid::new_v4(),
                name: "Sprinter".into(),
                color: "red".into(),
                price,
                quantity_available: 10,
                created_at: now,
            },
        }
    }

    #[test]
    fn totals_sum_quantity_times_price_with_zero_shipping() {
        let lines = vec![line(2, 100), line(1, 50)];
        let totals = compute_totals(&lines);
        assert_eq!(totals.amount, 250);
        assert_eq!(totals.shipping_amount, 0);
        assert_eq!(totals.total_amount, 250);
    }

    #[test]
    fn totals_of_empty_cart_are_zero() {
        let totals = compute_totals(&[]);
        assert_eq!(totals.amount, 0);
        assert_eq!(totals.total_amount, 0);
    }
}
