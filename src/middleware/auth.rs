use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};

use crate::{
    error::{AppError, AuthError, NegotiatedError},
    middleware::negotiate::ResponseMode,
    state::AppState,
};

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "jwt";

/// Cookie carrying a freshly issued token; lives as long as the token.
pub fn token_cookie(token: &str, ttl: chrono::Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(ttl.num_seconds()))
        .build()
}

/// Removal cookie for logout.
pub fn clear_token_cookie() -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

/// The caller identity, resolved once per request and passed to handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i32,
}

/// Where a presented token came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Bearer(String),
    Cookie(String),
}

impl Credential {
    /// Bearer header first, then the `jwt` cookie.
    pub fn resolve(headers: &HeaderMap) -> Option<Self> {
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty());
        if let Some(token) = bearer {
            return Some(Credential::Bearer(token.to_string()));
        }

        CookieJar::from_headers(headers)
            .get(TOKEN_COOKIE)
            .map(|cookie| cookie.value().trim().to_string())
            .filter(|token| !token.is_empty())
            .map(Credential::Cookie)
    }

    pub fn token(&self) -> &str {
        match self {
            Credential::Bearer(token) | Credential::Cookie(token) => token,
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            Credential::Bearer(_) => "bearer",
            Credential::Cookie(_) => "cookie",
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = NegotiatedError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let mode = ResponseMode::from_headers(&parts.headers);
        let credential = Credential::resolve(&parts.headers)
            .ok_or_else(|| AppError::from(AuthError::MissingCredentials).negotiated(mode))?;

        let claims = state.tokens.verify(credential.token()).map_err(|err| {
            tracing::debug!(source = credential.source(), "token rejected");
            AppError::from(err).negotiated(mode)
        })?;

        // A valid signature is not enough: the account must still exist under
        // the same name (ids are reused after a restart of the memory store).
        let user = state
            .store
            .find_user_by_id(claims.user_id)
            .await
            .map_err(|err| AppError::from(err).negotiated(mode))?;
        match user {
            Some(user) if user.username == claims.username => Ok(AuthUser { user_id: user.id }),
            _ => {
                tracing::debug!(user_id = claims.user_id, "token for unknown user");
                Err(AppError::from(AuthError::InvalidToken).negotiated(mode))
            }
        }
    }
}
