use balance_bike_shop::{
    db::{create_orm_conn, create_pool, run_migrations},
    entity::{
        addresses::ActiveModel as AddressActive,
        balance_bikes::{ActiveModel as BikeActive, Entity as BalanceBikes, Model as BalanceBike},
        orders::{Column as OrderCol, Entity as Orders},
        users::{ActiveModel as UserActive, Entity as Users},
    },
    error::AppError,
    forms::{AddressForm, UserEditForm},
    middleware::auth::AuthUser,
    services::{
        address_service,
        auth_service::{self, UpdateOutcome},
        cart_service, order_service,
    },
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

// Integration tests drive the service layer against a real database. Each
// test works with its own freshly created user, so they are safe to run in
// parallel and need no table truncation.
async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url =
        match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
                );
                return Ok(None);
            }
        };

    let pool = create_pool(&database_url).await?;
    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;

    Ok(Some(AppState { pool, orm }))
}

async fn create_user(state: &AppState) -> anyhow::Result<AuthUser> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(format!("rider-{}@example.com", Uuid::new_v4())),
        password_hash: Set("dummy".into()),
        first_name: Set(None),
        last_name: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser { user_id: user.id })
}

async fn create_bike(
    state: &AppState,
    price: i64,
    quantity_available: i32,
) -> anyhow::Result<BalanceBike> {
    let bike = BikeActive {
        id: Set(Uuid::new_v4()),
        name: Set("Test Sprinter".into()),
        color: Set(format!("color-{}", Uuid::new_v4())),
        price: Set(price),
        quantity_available: Set(quantity_available),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(bike)
}

async fn create_address(state: &AppState, user: &AuthUser) -> anyhow::Result<Uuid> {
    let address = AddressActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        city: Set("Sofia".into()),
        street: Set("1 Vitosha Blvd".into()),
        first_name: Set("Ada".into()),
        last_name: Set("Rider".into()),
        name_for_engraving: Set("Ada".into()),
        phone: Set("+359888123456".into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(address.id)
}

#[tokio::test]
async fn adding_same_product_twice_merges_into_one_line() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state).await?;
    let bike = create_bike(&state, 11900, 10).await?;

    cart_service::add_to_cart(&state, &user, bike.id).await?;
    cart_service::add_to_cart(&state, &user, bike.id).await?;

    let lines = cart_service::cart_lines(&state, &user).await?;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].item.quantity, 2);

    Ok(())
}

#[tokio::test]
async fn minus_on_quantity_one_line_deletes_it() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state).await?;
    let bike = create_bike(&state, 11900, 10).await?;

    let item = cart_service::add_to_cart(&state, &user, bike.id).await?;
    cart_service::minus_cart(&state, &user, item.id).await?;

    let lines = cart_service::cart_lines(&state, &user).await?;
    assert!(lines.is_empty());

    Ok(())
}

#[tokio::test]
async fn plus_stops_at_available_stock() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state).await?;
    let bike = create_bike(&state, 11900, 2).await?;

    let item = cart_service::add_to_cart(&state, &user, bike.id).await?;
    cart_service::plus_cart(&state, &user, item.id).await?;
    // quantity now equals quantity_available; this one must be a no-op
    cart_service::plus_cart(&state, &user, item.id).await?;

    let lines = cart_service::cart_lines(&state, &user).await?;
    assert_eq!(lines[0].item.quantity, 2);

    Ok(())
}

#[tokio::test]
async fn cart_totals_sum_lines_with_zero_shipping() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state).await?;
    let expensive = create_bike(&state, 100, 10).await?;
    let cheap = create_bike(&state, 50, 10).await?;

    cart_service::add_to_cart(&state, &user, expensive.id).await?;
    cart_service::add_to_cart(&state, &user, expensive.id).await?;
    cart_service::add_to_cart(&state, &user, cheap.id).await?;

    let lines = cart_service::cart_lines(&state, &user).await?;
    let totals = cart_service::compute_totals(&lines);
    assert_eq!(totals.amount, 250);
    assert_eq!(totals.shipping_amount, 0);
    assert_eq!(totals.total_amount, 250);

    Ok(())
}

#[tokio::test]
async fn checkout_requires_exactly_one_address() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state).await?;
    let bike = create_bike(&state, 11900, 10).await?;
    cart_service::add_to_cart(&state, &user, bike.id).await?;

    // No address at all
    let result = order_service::checkout(&state, &user).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    // More than one address
    create_address(&state, &user).await?;
    create_address(&state, &user).await?;
    let result = order_service::checkout(&state, &user).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    // Neither attempt may have created orders or touched the cart
    let orders = Orders::find()
        .filter(OrderCol::UserId.eq(user.user_id))
        .all(&state.orm)
        .await?;
    assert!(orders.is_empty());

    let lines = cart_service::cart_lines(&state, &user).await?;
    assert_eq!(lines.len(), 1);

    Ok(())
}

#[tokio::test]
async fn checkout_converts_cart_and_decrements_stock() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let user = create_user(&state).await?;
    let bike = create_bike(&state, 14900, 10).await?;
    let address_id = create_address(&state, &user).await?;

    let item = cart_service::add_to_cart(&state, &user, bike.id).await?;
    cart_service::plus_cart(&state, &user, item.id).await?;
    cart_service::plus_cart(&state, &user, item.id).await?;

    let orders = order_service::checkout(&state, &user).await?;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].quantity, 3);
    assert_eq!(orders[0].address_id, address_id);
    assert_eq!(orders[0].product_id, bike.id);

    let lines = cart_service::cart_lines(&state, &user).await?;
    assert!(lines.is_empty());

    let bike = BalanceBikes::find_by_id(bike.id)
        .one(&state.orm)
        .await?
        .expect("bike still exists");
    assert_eq!(bike.quantity_available, 7);

    Ok(())
}

#[tokio::test]
async fn address_operations_are_scoped_to_the_owner() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let owner = create_user(&state).await?;
    let other = create_user(&state).await?;
    let address_id = create_address(&state, &owner).await?;

    let form = AddressForm {
        city: "Plovdiv".into(),
        street: "5 Main St".into(),
        first_name: "Eve".into(),
        last_name: "Intruder".into(),
        name_for_engraving: "Eve".into(),
        phone: "+359888000000".into(),
    };

    let result = address_service::update_address(&state, &other, address_id, &form).await;
    assert!(matches!(result, Err(AppError::NotFound)));

    let result = address_service::delete_address(&state, &other, address_id).await;
    assert!(matches!(result, Err(AppError::NotFound)));

    // The owner still sees the untouched address
    let address = address_service::get_owned_address(&state, &owner, address_id).await?;
    assert_eq!(address.city, "Sofia");

    Ok(())
}

#[tokio::test]
async fn editing_email_to_a_registered_one_is_rejected() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let taken_email = format!("taken-{}@example.com", Uuid::new_v4());
    UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(taken_email.clone()),
        password_hash: Set("dummy".into()),
        first_name: Set(None),
        last_name: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    let editor = create_user(&state).await?;

    let form = UserEditForm {
        email: taken_email.clone(),
        first_name: "Ada".into(),
        last_name: "Rider".into(),
    };
    let outcome = auth_service::update_user(&state, editor.user_id, &form).await?;
    assert!(matches!(outcome, UpdateOutcome::EmailTaken));

    // The editor's row is untouched
    let editor_row = Users::find_by_id(editor.user_id)
        .one(&state.orm)
        .await?
        .expect("user exists");
    assert_ne!(editor_row.email, taken_email);

    // Keeping your own email is not a collision
    let form = UserEditForm {
        email: editor_row.email.clone(),
        first_name: "Ada".into(),
        last_name: "Rider".into(),
    };
    let outcome = auth_service::update_user(&state, editor.user_id, &form).await?;
    assert!(matches!(outcome, UpdateOutcome::Updated(_)));

    Ok(())
}

#[tokio::test]
async fn cart_removal_is_scoped_to_the_owner() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };
    let owner = create_user(&state).await?;
    let other = create_user(&state).await?;
    let bike = create_bike(&state, 11900, 10).await?;
    let item = cart_service::add_to_cart(&state, &owner, bike.id).await?;

    let result = cart_service::remove_cart(&state, &other, item.id).await;
    assert!(matches!(result, Err(AppError::NotFound)));

    let lines = cart_service::cart_lines(&state, &owner).await?;
    assert_eq!(lines.len(), 1);

    Ok(())
}
