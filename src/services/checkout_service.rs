use crate::middleware::auth::AuthUser;

pub const CHECKOUT_CONFIRMATION: &str = "Checkout Complete";

/// Confirmation only: no order is persisted and the cart is left as is.
pub async fn checkout(user: &AuthUser) -> &'static str {
    tracing::info!(user_id = user.user_id, "checkout requested");
    CHECKOUT_CONFIRMATION
}
