use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity::{
        addresses::{Column as AddressCol, Entity as Addresses},
        balance_bikes::{Column as BikeCol, Entity as BalanceBikes, Model as BalanceBike},
        cart_items::{Column as CartCol, Entity as CartItems},
        orders::{
            ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as Order,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    state::AppState,
};

/// An order row joined with the bike it was placed for.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub order: Order,
    pub bike: BalanceBike,
}

/// Convert the whole cart into order rows.
///
/// Requires exactly one delivery address; zero or many fail the operation
/// before anything is written. Every line becomes one order, the bike's
/// `quantity_available` drops by the line quantity (no floor at zero), and
/// the line is deleted. The conversion runs in a single transaction, so a
/// failure part-way leaves the cart untouched.
pub async fn checkout(state: &AppState, user: &AuthUser) -> AppResult<Vec<Order>> {
    let txn = state.orm.begin().await?;

    let addresses = Addresses::find()
        .filter(AddressCol::UserId.eq(user.user_id))
        .all(&txn)
        .await?;
    let address = match addresses.as_slice() {
        [single] => single,
        [] => {
            return Err(AppError::BadRequest(
                "Checkout requires a delivery address".into(),
            ));
        }
        _ => {
            return Err(AppError::BadRequest(
                "Checkout requires exactly one delivery address".into(),
            ));
        }
    };

    let items = CartItems::find()
        .filter(CartCol::UserId.eq(user.user_id))
        .order_by_asc(CartCol::CreatedAt)
        .all(&txn)
        .await?;

    let mut orders = Vec::with_capacity(items.len());
    for item in items {
        let order = OrderActive {
            id: Set(Uuid::new_v4()),
            user_id: Set(user.user_id),
            address_id: Set(address.id),
            product_id: Set(item.product_id),
            quantity: Set(item.quantity),
            ordered_date: NotSet,
        }
        .insert(&txn)
        .await?;
        orders.push(order);

        BalanceBikes::update_many()
            .col_expr(
                BikeCol::QuantityAvailable,
                Expr::col(BikeCol::QuantityAvailable).sub(item.quantity),
            )
            .filter(BikeCol::Id.eq(item.product_id))
            .exec(&txn)
            .await?;

        CartItems::delete_by_id(item.id).exec(&txn).await?;
    }

    txn.commit().await?;

    tracing::info!(user_id = %user.user_id, orders = orders.len(), "checkout complete");
    Ok(orders)
}

/// The user's order history, newest first.
pub async fn list_orders(state: &AppState, user: &AuthUser) -> AppResult<Vec<OrderLine>> {
    let rows = Orders::find()
        .filter(OrderCol::UserId.eq(user.user_id))
        .order_by_desc(OrderCol::OrderedDate)
        .find_also_related(BalanceBikes)
        .all(&state.orm)
        .await?;

    let mut lines = Vec::with_capacity(rows.len());
    for (order, bike) in rows {
        let bike = bike.ok_or(AppError::NotFound)?;
        lines.push(OrderLine { order, bike });
    }
    Ok(lines)
}
