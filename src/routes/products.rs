use axum::{
    Json, Router,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
};

use crate::{
    dto::products::ProductList,
    error::NegotiatedError,
    middleware::{auth::AuthUser, negotiate::ResponseMode},
    response::ErrorBody,
    services::product_service,
    state::AppState,
    views,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_products))
}

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products, or the products page for browsers", body = ProductList),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Invalid or expired token", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    mode: ResponseMode,
    _user: AuthUser,
) -> Result<Response, NegotiatedError> {
    let products = product_service::list_products(&state)
        .await
        .map_err(|e| e.negotiated(mode))?;

    Ok(match mode {
        ResponseMode::Html => Html(views::products_page(&products.items)).into_response(),
        ResponseMode::Json => Json(products).into_response(),
    })
}
