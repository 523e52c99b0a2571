use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::{
    error::AppResult,
    forms::{FieldError, LoginForm, SignupForm},
    middleware::auth::{clear_session, set_session_user},
    services::auth_service::{self, SignupOutcome},
    state::AppState,
};

#[derive(Template, WebTemplate)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub form: SignupForm,
    pub errors: Vec<FieldError>,
}

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub form: LoginForm,
    pub error: Option<String>,
}

pub async fn signup_page() -> SignupTemplate {
    SignupTemplate {
        form: SignupForm::default(),
        errors: Vec::new(),
    }
}

/// Create the user and log them straight in.
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> AppResult<Response> {
    let mut errors = form.validate();
    if errors.is_empty() {
        match auth_service::signup_user(&state, &form).await? {
            SignupOutcome::Created(user) => {
                set_session_user(&session, user.id).await?;
                return Ok(Redirect::to("/").into_response());
            }
            SignupOutcome::EmailTaken => {
                errors.push(FieldError {
                    field: "email",
                    message: "This email is already taken".into(),
                });
            }
        }
    }

    Ok(SignupTemplate { form, errors }.into_response())
}

pub async fn login_page() -> LoginTemplate {
    LoginTemplate {
        form: LoginForm::default(),
        error: None,
    }
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if form.validate().is_empty() {
        if let Some(user) = auth_service::verify_login(&state, &form.email, &form.password).await? {
            set_session_user(&session, user.id).await?;
            return Ok(Redirect::to("/").into_response());
        }
    }

    Ok(LoginTemplate {
        form: LoginForm {
            email: form.email,
            password: String::new(),
        },
        error: Some("Invalid email or password".into()),
    }
    .into_response())
}

pub async fn logout(session: Session) -> AppResult<Redirect> {
    clear_session(&session).await?;
    Ok(Redirect::to("/"))
}
