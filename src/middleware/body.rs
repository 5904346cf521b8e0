use axum::{
    Form,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, NegotiatedError},
    middleware::negotiate::ResponseMode,
};

/// Request body accepted either as a urlencoded browser form or as JSON.
///
/// JSON is parsed regardless of `Content-Type`, and an empty body reads as
/// `{}` so that missing fields surface as validation errors instead of
/// extractor rejections.
#[derive(Debug, Clone)]
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = NegotiatedError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mode = ResponseMode::from_headers(req.headers());
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::Validation(rejection.body_text()).negotiated(mode))?;
            return Ok(Self(value));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()).negotiated(mode))?;
        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };
        let value = serde_json::from_slice(raw).map_err(|err| {
            AppError::Validation(format!("Invalid request body: {err}")).negotiated(mode)
        })?;
        Ok(Self(value))
    }
}
