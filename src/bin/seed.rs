use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use balance_bike_shop::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let user_id = ensure_user(&pool, "rider@example.com", "ride4ever").await?;
    seed_bikes(&pool).await?;

    println!("Seed completed. Demo user ID: {user_id}");
    Ok(())
}

async fn ensure_user(pool: &sqlx::PgPool, email: &str, password: &str) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .fetch_optional(pool)
    .await?;

    // If the user already exists, fetch the id
    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {email}");
    Ok(user_id)
}

async fn seed_bikes(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let bikes = vec![
        ("Sprinter 12\"", "red", 11900_i64, 12_i32),
        ("Sprinter 12\"", "blue", 11900, 8),
        ("Cruiser 14\"", "green", 14900, 5),
        ("Cruiser 14\"", "yellow", 14900, 3),
    ];

    for (name, color, price, quantity) in bikes {
        sqlx::query(
            r#"
            INSERT INTO balance_bikes (id, name, color, price, quantity_available)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (name, color) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(color)
        .bind(price)
        .bind(quantity)
        .execute(pool)
        .await?;
    }

    println!("Seeded balance bikes");
    Ok(())
}
