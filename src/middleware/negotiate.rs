use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

/// How the caller wants responses and failures rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// Browser navigation: pages, redirects, inline error pages.
    Html,
    /// API clients: JSON bodies and `{error}` envelopes.
    Json,
}

impl ResponseMode {
    /// HTML only when `Accept` names `text/html` and not `application/json`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let accept = headers
            .get_all(header::ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(','))
            .map(|part| {
                part.split(';')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_ascii_lowercase()
            })
            .collect::<Vec<_>>();

        let wants_html = accept.iter().any(|media| media == "text/html");
        let wants_json = accept.iter().any(|media| media == "application/json");
        if wants_html && !wants_json {
            ResponseMode::Html
        } else {
            ResponseMode::Json
        }
    }

    pub fn is_html(self) -> bool {
        self == ResponseMode::Html
    }
}

impl<S> FromRequestParts<S> for ResponseMode
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ResponseMode::from_headers(&parts.headers))
    }
}
