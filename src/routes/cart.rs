use axum::{
    Json, Router,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    dto::cart::{CartItemRequest, CartList},
    error::NegotiatedError,
    middleware::{auth::AuthUser, body::JsonOrForm, negotiate::ResponseMode},
    response::{ErrorBody, MessageResponse, found},
    services::cart_service,
    state::AppState,
    views,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_cart))
        .route("/list", get(list_cart))
        .route("/add", post(add_to_cart))
        .route("/remove", post(remove_from_cart))
        .route("/clear", post(clear_cart))
}

#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "Cart items, or the cart page for browsers", body = CartList),
        (status = 401, description = "Not logged in", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn view_cart(
    State(state): State<AppState>,
    mode: ResponseMode,
    user: AuthUser,
) -> Result<Response, NegotiatedError> {
    let cart = cart_service::list_cart(&state, &user)
        .await
        .map_err(|e| e.negotiated(mode))?;

    Ok(match mode {
        ResponseMode::Html => Html(views::cart_page(&cart.items)).into_response(),
        ResponseMode::Json => Json(cart).into_response(),
    })
}

#[utoipa::path(
    get,
    path = "/cart/list",
    responses(
        (status = 200, description = "Cart items of the current user", body = CartList),
        (status = 401, description = "Not logged in", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn list_cart(
    State(state): State<AppState>,
    mode: ResponseMode,
    user: AuthUser,
) -> Result<Json<CartList>, NegotiatedError> {
    let cart = cart_service::list_cart(&state, &user)
        .await
        .map_err(|e| e.negotiated(mode))?;
    Ok(Json(cart))
}

#[utoipa::path(
    post,
    path = "/cart/add",
    request_body = CartItemRequest,
    responses(
        (status = 200, description = "Item added", body = MessageResponse),
        (status = 302, description = "Browser form post, redirects to the cart page"),
        (status = 400, description = "Missing product_id, bad quantity or unknown product", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    mode: ResponseMode,
    user: AuthUser,
    JsonOrForm(payload): JsonOrForm<CartItemRequest>,
) -> Result<Response, NegotiatedError> {
    cart_service::add_to_cart(&state, &user, payload)
        .await
        .map_err(|e| e.negotiated(mode))?;
    Ok(done(mode, "Item added to cart"))
}

#[utoipa::path(
    post,
    path = "/cart/remove",
    request_body = CartItemRequest,
    responses(
        (status = 200, description = "Quantity decreased, line deleted at zero", body = MessageResponse),
        (status = 404, description = "Product not in cart", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    mode: ResponseMode,
    user: AuthUser,
    JsonOrForm(payload): JsonOrForm<CartItemRequest>,
) -> Result<Response, NegotiatedError> {
    cart_service::remove_from_cart(&state, &user, payload)
        .await
        .map_err(|e| e.negotiated(mode))?;
    Ok(done(mode, "Item removed from cart"))
}

#[utoipa::path(
    post,
    path = "/cart/clear",
    responses(
        (status = 200, description = "Cart emptied", body = MessageResponse),
        (status = 401, description = "Not logged in", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    mode: ResponseMode,
    user: AuthUser,
) -> Result<Response, NegotiatedError> {
    cart_service::clear_cart(&state, &user)
        .await
        .map_err(|e| e.negotiated(mode))?;
    Ok(done(mode, "Cart cleared successfully"))
}

fn done(mode: ResponseMode, message: &str) -> Response {
    match mode {
        ResponseMode::Html => found("/cart"),
        ResponseMode::Json => Json(MessageResponse::new(message)).into_response(),
    }
}
