use axum::{Router, routing::get};

use crate::state::AppState;

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod doc;
pub mod health;
pub mod products;

// JSON/HTML endpoints, mounted both at the root and under `/api`.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/cart", cart::router())
        .merge(auth::router())
        .merge(checkout::router())
}

pub fn create_router() -> Router<AppState> {
    let api = create_api_router();
    Router::new()
        .route("/", get(products::list_products))
        .route("/health", get(health::health_check))
        .merge(api.clone())
        .nest("/api", api)
}
