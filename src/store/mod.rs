//! Persistence for users, the product catalog, and carts.

use async_trait::async_trait;

use crate::{
    error::StoreError,
    models::{CartItem, Product, User},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Result of [`Store::add_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The line's quantity after the add.
    Added(i32),
    UnknownProduct,
    /// The new quantity would not fit in an `i32`; the line is unchanged.
    QuantityOverflow,
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Check that the backing store answers.
    async fn health_check(&self) -> StoreResult<()>;

    async fn find_user(&self, username: &str) -> StoreResult<Option<User>>;

    async fn find_user_by_id(&self, id: i32) -> StoreResult<Option<User>>;

    /// Insert a user unless the username is taken; `None` means another
    /// writer got there first.
    async fn create_user(&self, username: &str, password_hash: &str)
    -> StoreResult<Option<User>>;

    /// All products, ordered by id.
    async fn list_products(&self) -> StoreResult<Vec<Product>>;

    /// Insert the line or add `quantity` to it, atomically.
    async fn add_item(&self, user_id: i32, product_id: i32, quantity: i32)
    -> StoreResult<AddOutcome>;

    /// Subtract `quantity`, deleting the line once it reaches zero. Returns
    /// the remaining quantity, or `None` when there was no such line.
    async fn remove_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> StoreResult<Option<i32>>;

    /// The owner's lines joined with their products, in insertion order.
    async fn list_items(&self, user_id: i32) -> StoreResult<Vec<CartItem>>;

    /// Delete every line of the owner; returns how many were removed.
    async fn clear_cart(&self, user_id: i32) -> StoreResult<u64>;
}
