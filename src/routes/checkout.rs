use axum::{Router, routing::get};

use crate::{
    middleware::auth::AuthUser, response::ErrorBody, services::checkout_service, state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/checkout", get(checkout).post(checkout))
}

#[utoipa::path(
    post,
    path = "/checkout",
    responses(
        (status = 200, description = "Fixed confirmation text", body = String, content_type = "text/plain"),
        (status = 401, description = "Not logged in", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Checkout"
)]
pub async fn checkout(user: AuthUser) -> &'static str {
    checkout_service::checkout(&user).await
}
