use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    middleware::negotiate::ResponseMode,
    response::{ErrorBody, found},
    views,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error")]
    Sqlx(#[from] sqlx::Error),

    #[error("ORM error")]
    Orm(#[from] sea_orm::DbErr),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingCredentials,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials | AuthError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::InvalidToken => StatusCode::FORBIDDEN,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal Server Error")]
    Store(#[from] StoreError),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(err) => err.status(),
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Pair the error with the caller's response mode.
    pub fn negotiated(self, mode: ResponseMode) -> NegotiatedError {
        NegotiatedError { mode, error: self }
    }

    fn log(&self) {
        match self {
            AppError::Store(err) => {
                tracing::error!(error = ?err, "store failure");
            }
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "internal failure");
            }
            other => {
                tracing::debug!(status = %other.status(), error = %other, "request rejected");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.negotiated(ResponseMode::Json).into_response()
    }
}

/// An [`AppError`] rendered the way the caller asked for: a JSON envelope,
/// or a redirect / inline page for browsers.
#[derive(Debug)]
pub struct NegotiatedError {
    pub mode: ResponseMode,
    pub error: AppError,
}

impl IntoResponse for NegotiatedError {
    fn into_response(self) -> Response {
        let NegotiatedError { mode, error } = self;
        error.log();
        let status = error.status();
        match (mode, &error) {
            (ResponseMode::Html, AppError::Auth(_)) => found("/login"),
            (ResponseMode::Html, _) => {
                (status, Html(views::error_page(status, &error.to_string()))).into_response()
            }
            (ResponseMode::Json, _) => {
                (status, axum::Json(ErrorBody::new(error.to_string()))).into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use axum::http::header;

    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(AppError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::from(AuthError::MissingCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(AuthError::InvalidToken).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::from(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_hide_their_cause() {
        let err = AppError::from(anyhow::anyhow!("connection refused at 10.0.0.1"));
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    #[test]
    fn html_auth_failures_redirect_to_login() {
        let response = AppError::from(AuthError::InvalidToken)
            .negotiated(ResponseMode::Html)
            .into_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[test]
    fn html_validation_failures_render_a_page() {
        let response = AppError::Validation("product_id is required".into())
            .negotiated(ResponseMode::Html)
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
    }
}
