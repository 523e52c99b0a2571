use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer, cookie::SameSite, cookie::time::Duration};
use tower_sessions_sqlx_store::PostgresStore;

pub const SESSION_COOKIE_NAME: &str = "bbshop_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Postgres-backed session layer. The store's table is created by
/// `PostgresStore::migrate` at startup.
pub async fn create_session_layer(
    pool: &PgPool,
) -> anyhow::Result<SessionManagerLayer<PostgresStore>> {
    let store = PostgresStore::new(pool.clone());
    store.migrate().await?;

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            SESSION_EXPIRY_SECONDS,
        )))
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/"))
}
