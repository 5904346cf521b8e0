use axum::{
    Json, Router,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::CookieJar;

use crate::{
    dto::auth::{LoginRequest, LoginResponse},
    error::NegotiatedError,
    middleware::{
        auth::{clear_token_cookie, token_cookie},
        body::JsonOrForm,
        negotiate::ResponseMode,
    },
    response::{ErrorBody, MessageResponse, found},
    services::auth_service::login_user,
    state::AppState,
    views,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
}

pub async fn login_page() -> Html<String> {
    Html(views::login_page())
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued and set as the `jwt` cookie", body = LoginResponse),
        (status = 302, description = "Browser form post, redirects to `/`"),
        (status = 400, description = "Missing username or password", body = ErrorBody),
        (status = 401, description = "Invalid username or password", body = ErrorBody)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    mode: ResponseMode,
    jar: CookieJar,
    JsonOrForm(payload): JsonOrForm<LoginRequest>,
) -> Result<Response, NegotiatedError> {
    let resp = login_user(&state, payload)
        .await
        .map_err(|e| e.negotiated(mode))?;

    let jar = jar.add(token_cookie(
        &resp.token,
        state.tokens.ttl(),
        state.auth.cookie_secure,
    ));
    Ok(match mode {
        ResponseMode::Html => (jar, found("/")).into_response(),
        ResponseMode::Json => (jar, Json(resp)).into_response(),
    })
}

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Cookie cleared", body = MessageResponse),
        (status = 302, description = "Browser form post, redirects to `/login`")
    ),
    tag = "Auth"
)]
pub async fn logout(mode: ResponseMode, jar: CookieJar) -> Response {
    let jar = jar.add(clear_token_cookie());
    match mode {
        ResponseMode::Html => (jar, found("/login")).into_response(),
        ResponseMode::Json => {
            (jar, Json(MessageResponse::new("Logged out successfully"))).into_response()
        }
    }
}
