use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use sea_orm::*;
use tracing::instrument;

use crate::entity::user;
use crate::error::AppError;
use crate::extractors::auth::SESSION_COOKIE;
use crate::extractors::form::AppForm;
use crate::models::accounts::{
    AccountFormView, LOGIN_ERROR, LoginForm, SIGNUP_ERROR, SignupForm, validate_signup,
};
use crate::state::AppState;
use crate::utils::{hash, jwt};

/// Blank sign-up form document.
pub async fn signup_form() -> Json<AccountFormView> {
    Json(AccountFormView { error: None })
}

/// Handle a sign-up submission: create the user, start a session, and send
/// them to their cat list. Every failure mode re-renders the form with the
/// same fixed error string and creates no user row.
#[instrument(skip(state, jar, form), fields(username = %form.username))]
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    AppForm(form): AppForm<SignupForm>,
) -> Result<Response, AppError> {
    let username = match validate_signup(&form) {
        Ok(username) => username,
        Err(reason) => {
            tracing::debug!("rejected sign up: {reason}");
            return Ok(signup_rejected());
        }
    };

    let hash = hash::hash_password(&form.password1)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let new_user = user::ActiveModel {
        username: Set(username),
        password: Set(hash),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let user = match new_user.insert(&state.db).await {
        Ok(user) => user,
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            tracing::debug!("rejected sign up: username taken");
            return Ok(signup_rejected());
        }
        Err(e) => return Err(e.into()),
    };

    let jar = start_session(jar, &state, user.id, &user.username)?;
    Ok((jar, Redirect::to("/cats/")).into_response())
}

/// Blank login form document.
pub async fn login_form() -> Json<AccountFormView> {
    Json(AccountFormView { error: None })
}

/// Handle a login submission. Failures re-render with a generic error that
/// never reveals whether the username exists.
#[instrument(skip(state, jar, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppForm(form): AppForm<LoginForm>,
) -> Result<Response, AppError> {
    let username = form.username.trim();

    let user = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(&state.db)
        .await?;

    let Some(user) = user else {
        return Ok(login_rejected());
    };

    let is_valid = hash::verify_password(&form.password, &user.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

    if !is_valid {
        return Ok(login_rejected());
    }

    let jar = start_session(jar, &state, user.id, &user.username)?;
    Ok((jar, Redirect::to("/cats/")).into_response())
}

/// Clear the session cookie and return to the landing page.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/"));
    (jar, Redirect::to("/"))
}

fn start_session(
    jar: CookieJar,
    state: &AppState,
    user_id: i32,
    username: &str,
) -> Result<CookieJar, AppError> {
    let token = jwt::sign(
        user_id,
        username,
        &state.config.auth.jwt_secret,
        state.config.auth.session_ttl_days,
    )
    .map_err(|e| AppError::Internal(format!("Session sign error: {}", e)))?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .build();
    Ok(jar.add(cookie))
}

fn signup_rejected() -> Response {
    Json(AccountFormView {
        error: Some(SIGNUP_ERROR),
    })
    .into_response()
}

fn login_rejected() -> Response {
    Json(AccountFormView {
        error: Some(LOGIN_ERROR),
    })
    .into_response()
}
