use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use uuid::Uuid;

/// Session key holding the logged-in user's id.
pub const SESSION_USER_KEY: &str = "user_id";

/// Extractor for the logged-in user. Routes that take an `AuthUser` reject
/// anonymous requests with a redirect to the login page.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
}

pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // SessionManagerLayer stores the session in request extensions.
        let session = parts.extensions.get::<Session>().ok_or(AuthRedirect)?;

        let user_id: Uuid = session
            .get(SESSION_USER_KEY)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRedirect)?;

        Ok(AuthUser { user_id })
    }
}

/// Record the user id in the session after signup or login.
pub async fn set_session_user(
    session: &Session,
    user_id: Uuid,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(SESSION_USER_KEY, user_id).await
}

/// Drop the whole session on logout or account deletion.
pub async fn clear_session(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
