use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "session";

/// Authenticated user for the current request.
///
/// Add this as a handler parameter to require authentication. The token is
/// read from the `session` cookie set at login, or equivalently from an
/// `Authorization: Bearer <token>` header. A missing or invalid token
/// redirects to the login page; no page content is rendered.
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let bearer = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value())
            .or(bearer)
            .ok_or(AppError::Unauthenticated)?;

        let claims = jwt::verify(token, &state.config.auth.jwt_secret)
            .map_err(|_| AppError::Unauthenticated)?;

        Ok(AuthUser {
            user_id: claims.uid,
            username: claims.sub,
        })
    }
}
