use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use liberalia_auth_types::cookie::{clear_session_cookie, set_session_cookie};
use liberalia_auth_types::session::{LOGIN_PATH, SessionUser};

use crate::domain::types::LOGIN_PASSWORD_MIN_LEN;
use crate::error::CatalogError;
use crate::handlers::session_role;
use crate::state::AppState;
use crate::usecase::login::{
    ChangePasswordInput, ChangePasswordUseCase, LoginInput, LoginUseCase,
};
use crate::usecase::role::{LANDING_PATH, landing_target};

// ── GET / ────────────────────────────────────────────────────────────────────

pub async fn home(
    user: SessionUser,
    State(state): State<AppState>,
) -> Result<Redirect, CatalogError> {
    let role = session_role(&state, user.user_id).await?;
    Ok(Redirect::to(&landing_target(role)))
}

// ── GET /accounts/login/ ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct FormField {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub input_type: &'static str,
    pub autocomplete: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
}

#[derive(Serialize)]
pub struct LoginFormResponse {
    pub action: &'static str,
    pub method: &'static str,
    pub fields: [FormField; 2],
}

fn login_form_description() -> LoginFormResponse {
    LoginFormResponse {
        action: LOGIN_PATH,
        method: "post",
        fields: [
            FormField {
                name: "email",
                input_type: "email",
                autocomplete: "email",
                required: true,
                min_length: None,
            },
            FormField {
                name: "password",
                input_type: "password",
                autocomplete: "current-password",
                required: true,
                min_length: Some(LOGIN_PASSWORD_MIN_LEN),
            },
        ],
    }
}

pub async fn login_form(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, CatalogError> {
    // A session without a role still gets the form, otherwise `/` and the
    // login page would redirect to each other.
    if let Some(user) = SessionUser::from_jar(&jar, &state.session_key) {
        if session_role(&state, user.user_id).await?.is_some() {
            return Ok(Redirect::to(LANDING_PATH).into_response());
        }
    }
    Ok(Json(login_form_description()).into_response())
}

// ── POST /accounts/login/ ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Failed login: the generic message plus the form to show again.
#[derive(Serialize)]
pub struct LoginFailedResponse {
    pub kind: &'static str,
    pub message: String,
    pub form: LoginFormResponse,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, CatalogError> {
    let usecase = LoginUseCase {
        accounts: state.account_repo(),
        session_secret: state.session_key.secret().to_owned(),
    };
    let result = usecase
        .execute(LoginInput {
            email: form.email,
            password: form.password,
        })
        .await;
    let output = match result {
        Ok(output) => output,
        Err(e @ CatalogError::InvalidCredentials) => {
            tracing::info!("login rejected");
            let body = LoginFailedResponse {
                kind: e.kind(),
                message: e.to_string(),
                form: login_form_description(),
            };
            return Ok((StatusCode::UNAUTHORIZED, Json(body)).into_response());
        }
        Err(e) => return Err(e),
    };

    tracing::info!(user_id = %output.user_id, expires_at = output.expires_at, "login");
    let jar = set_session_cookie(jar, output.session_token, &state.cookies);
    Ok((jar, Redirect::to(LANDING_PATH)).into_response())
}

// ── GET /accounts/logout/ ────────────────────────────────────────────────────

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(user) = SessionUser::from_jar(&jar, &state.session_key) {
        tracing::info!(user_id = %user.user_id, "logout");
    }
    (
        clear_session_cookie(jar, &state.cookies),
        Redirect::to(LOGIN_PATH),
    )
}

// ── POST /accounts/password_change/ ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct PasswordChangeForm {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password1: String,
    #[serde(default)]
    pub new_password2: String,
}

pub async fn password_change(
    user: SessionUser,
    State(state): State<AppState>,
    Form(form): Form<PasswordChangeForm>,
) -> Result<StatusCode, CatalogError> {
    let usecase = ChangePasswordUseCase {
        accounts: state.account_repo(),
    };
    usecase
        .execute(
            user.user_id,
            ChangePasswordInput {
                old_password: form.old_password,
                new_password1: form.new_password1,
                new_password2: form.new_password2,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
