use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    models::{CartItem, Product, User},
    store::{AddOutcome, Store, StoreResult},
};

#[derive(Debug, Clone)]
struct CartRow {
    id: i32,
    user_id: i32,
    product_id: i32,
    quantity: i32,
}

#[derive(Debug, Default)]
struct Inner {
    users: Vec<User>,
    products: Vec<Product>,
    cart: Vec<CartRow>,
    next_user_id: i32,
    next_cart_id: i32,
}

/// In-process store. Every operation runs under one lock, so the cart upsert
/// is as atomic as its Postgres counterpart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                products,
                next_user_id: 1,
                next_cart_id: 1,
                ..Inner::default()
            }),
        }
    }

    /// The same catalog the `products` migration seeds.
    pub fn seeded() -> Self {
        Self::with_products(vec![
            Product {
                id: 1,
                name: "Laptop".to_string(),
                price: 999,
            },
            Product {
                id: 2,
                name: "Mouse".to_string(),
                price: 29,
            },
        ])
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_user(&self, username: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: i32) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> StoreResult<Option<User>> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.username == username) {
            return Ok(None);
        }
        let id = inner.next_user_id.max(1);
        inner.next_user_id = id + 1;
        let user = User {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(Some(user))
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let inner = self.inner.read().await;
        let mut products = inner.products.clone();
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    async fn add_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> StoreResult<AddOutcome> {
        let mut inner = self.inner.write().await;
        if !inner.products.iter().any(|p| p.id == product_id) {
            return Ok(AddOutcome::UnknownProduct);
        }
        if let Some(row) = inner
            .cart
            .iter_mut()
            .find(|r| r.user_id == user_id && r.product_id == product_id)
        {
            let Some(total) = row.quantity.checked_add(quantity) else {
                return Ok(AddOutcome::QuantityOverflow);
            };
            row.quantity = total;
            return Ok(AddOutcome::Added(total));
        }
        let id = inner.next_cart_id.max(1);
        inner.next_cart_id = id + 1;
        inner.cart.push(CartRow {
            id,
            user_id,
            product_id,
            quantity,
        });
        Ok(AddOutcome::Added(quantity))
    }

    async fn remove_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> StoreResult<Option<i32>> {
        let mut inner = self.inner.write().await;
        let Some(pos) = inner
            .cart
            .iter()
            .position(|r| r.user_id == user_id && r.product_id == product_id)
        else {
            return Ok(None);
        };
        let remaining = (inner.cart[pos].quantity - quantity).max(0);
        if remaining == 0 {
            inner.cart.remove(pos);
        } else {
            inner.cart[pos].quantity = remaining;
        }
        Ok(Some(remaining))
    }

    async fn list_items(&self, user_id: i32) -> StoreResult<Vec<CartItem>> {
        let inner = self.inner.read().await;
        let mut rows: Vec<&CartRow> = inner.cart.iter().filter(|r| r.user_id == user_id).collect();
        rows.sort_by_key(|r| r.id);
        let items = rows
            .into_iter()
            .filter_map(|row| {
                inner
                    .products
                    .iter()
                    .find(|p| p.id == row.product_id)
                    .map(|p| CartItem {
                        id: p.id,
                        name: p.name.clone(),
                        price: p.price,
                        quantity: row.quantity,
                    })
            })
            .collect();
        Ok(items)
    }

    async fn clear_cart(&self, user_id: i32) -> StoreResult<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.cart.len();
        inner.cart.retain(|r| r.user_id != user_id);
        Ok((before - inner.cart.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn repeated_adds_increment_one_line() {
        let store = MemoryStore::seeded();
        assert_eq!(store.add_item(7, 1, 1).await.unwrap(), AddOutcome::Added(1));
        assert_eq!(store.add_item(7, 1, 1).await.unwrap(), AddOutcome::Added(2));

        let items = store.list_items(7).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].name, "Laptop");
    }

    #[tokio::test]
    async fn unknown_product_is_not_added() {
        let store = MemoryStore::seeded();
        assert_eq!(
            store.add_item(7, 42, 1).await.unwrap(),
            AddOutcome::UnknownProduct
        );
        assert!(store.list_items(7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_adds_do_not_duplicate_lines() {
        let store = Arc::new(MemoryStore::seeded());
        let handles: Vec<_> = (0..20)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.add_item(3, 2, 1).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let items = store.list_items(3).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 20);
    }

    #[tokio::test]
    async fn overflowing_add_leaves_the_line_unchanged() {
        let store = MemoryStore::seeded();
        assert_eq!(
            store.add_item(7, 1, i32::MAX).await.unwrap(),
            AddOutcome::Added(i32::MAX)
        );
        assert_eq!(
            store.add_item(7, 1, 1).await.unwrap(),
            AddOutcome::QuantityOverflow
        );
        assert_eq!(store.list_items(7).await.unwrap()[0].quantity, i32::MAX);
    }

    #[tokio::test]
    async fn remove_decrements_then_deletes() {
        let store = MemoryStore::seeded();
        store.add_item(1, 2, 3).await.unwrap();
        assert_eq!(store.remove_item(1, 2, 1).await.unwrap(), Some(2));
        assert_eq!(store.remove_item(1, 2, 5).await.unwrap(), Some(0));
        assert!(store.list_items(1).await.unwrap().is_empty());
        assert_eq!(store.remove_item(1, 2, 1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn clear_only_touches_the_owner() {
        let store = MemoryStore::seeded();
        store.add_item(1, 1, 1).await.unwrap();
        store.add_item(1, 2, 1).await.unwrap();
        store.add_item(2, 1, 4).await.unwrap();

        assert_eq!(store.clear_cart(1).await.unwrap(), 2);
        assert_eq!(store.clear_cart(1).await.unwrap(), 0);
        assert!(store.list_items(1).await.unwrap().is_empty());
        assert_eq!(store.list_items(2).await.unwrap()[0].quantity, 4);
    }

    #[tokio::test]
    async fn usernames_are_unique() {
        let store = MemoryStore::seeded();
        let first = store.create_user("alice", "hash").await.unwrap();
        assert!(first.is_some());
        assert!(store.create_user("alice", "other").await.unwrap().is_none());
        let found = store.find_user("alice").await.unwrap().unwrap();
        assert_eq!(found.password_hash, "hash");
        let by_id = store.find_user_by_id(found.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");
        assert!(store.find_user_by_id(found.id + 1).await.unwrap().is_none());
    }
}
