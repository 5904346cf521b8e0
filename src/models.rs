use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: i32,
}

/// A cart row joined with its product. `id` is the product id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CartItem {
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub quantity: i32,
}

impl CartItem {
    /// The line shown on the cart page, e.g. `Laptop - $999 (Qty: 1)`.
    pub fn display_line(&self) -> String {
        format!("{} - ${} (Qty: {})", self.name, self.price, self.quantity)
    }
}
