use crate::{
    dto::cart::{CartItemRequest, CartList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    state::AppState,
    store::AddOutcome,
};

pub async fn list_cart(state: &AppState, user: &AuthUser) -> AppResult<CartList> {
    let items = state.store.list_items(user.user_id).await?;
    Ok(CartList { items })
}

/// Add `quantity` (default 1) of a product, returning the line's new quantity.
pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: CartItemRequest,
) -> AppResult<i32> {
    let (product_id, quantity) = validate(payload)?;
    let new_quantity = match state.store.add_item(user.user_id, product_id, quantity).await? {
        AddOutcome::Added(total) => total,
        AddOutcome::UnknownProduct => {
            return Err(AppError::Validation("Product not found".to_string()));
        }
        AddOutcome::QuantityOverflow => {
            return Err(AppError::Validation("quantity too large".to_string()));
        }
    };

    tracing::info!(
        user_id = user.user_id,
        product_id,
        quantity = new_quantity,
        "cart item added"
    );
    Ok(new_quantity)
}

/// Take `quantity` (default 1) off a line, returning what is left.
pub async fn remove_from_cart(
    state: &AppState,
    user: &AuthUser,
    payload: CartItemRequest,
) -> AppResult<i32> {
    let (product_id, quantity) = validate(payload)?;
    let remaining = state
        .store
        .remove_item(user.user_id, product_id, quantity)
        .await?
        .ok_or_else(|| AppError::NotFound("Item not in cart".to_string()))?;

    tracing::info!(
        user_id = user.user_id,
        product_id,
        quantity = remaining,
        "cart item removed"
    );
    Ok(remaining)
}

/// Always succeeds, also on an empty cart.
pub async fn clear_cart(state: &AppState, user: &AuthUser) -> AppResult<()> {
    let removed = state.store.clear_cart(user.user_id).await?;
    tracing::info!(user_id = user.user_id, removed, "cart cleared");
    Ok(())
}

fn validate(payload: CartItemRequest) -> AppResult<(i32, i32)> {
    let product_id = payload
        .product_id
        .ok_or_else(|| AppError::Validation("product_id is required".to_string()))?;
    let quantity = payload.quantity.unwrap_or(1);
    if quantity <= 0 {
        return Err(AppError::Validation(
            "quantity must be greater than 0".to_string(),
        ));
    }
    Ok((product_id, quantity))
}
