use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    db::{DbPool, OrmConn, create_orm_conn},
    entity::{
        Products, Users,
        products::{self, Model as ProductModel},
        users::{self, Model as UserModel},
    },
    models::{CartItem, Product, User},
    store::{AddOutcome, Store, StoreResult},
};

/// SQLSTATE `numeric_value_out_of_range`.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Postgres-backed store. Reads of users and products go through SeaORM;
/// cart mutations are single SQL statements so they stay atomic.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
    orm: OrmConn,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        let orm = create_orm_conn(&pool);
        Self { pool, orm }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        self.orm.execute_unprepared("SELECT 1").await?;
        Ok(())
    }

    async fn find_user(&self, username: &str) -> StoreResult<Option<User>> {
        let user = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.orm)
            .await?
            .map(user_from_entity);
        Ok(user)
    }

    async fn find_user_by_id(&self, id: i32) -> StoreResult<Option<User>> {
        let user = Users::find_by_id(id)
            .one(&self.orm)
            .await?
            .map(user_from_entity);
        Ok(user)
    }

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (username) DO NOTHING
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let items = Products::find()
            .order_by_asc(products::Column::Id)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(product_from_entity)
            .collect();
        Ok(items)
    }

    async fn add_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> StoreResult<AddOutcome> {
        let row: Result<Option<(i32,)>, sqlx::Error> = sqlx::query_as(
            r#"
            INSERT INTO cart (user_id, product_id, quantity)
            SELECT $1, p.id, $3 FROM products p WHERE p.id = $2
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = cart.quantity + EXCLUDED.quantity
            RETURNING quantity
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await;

        match row {
            Ok(Some((quantity,))) => Ok(AddOutcome::Added(quantity)),
            Ok(None) => Ok(AddOutcome::UnknownProduct),
            Err(sqlx::Error::Database(err))
                if err.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE) =>
            {
                Ok(AddOutcome::QuantityOverflow)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn remove_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> StoreResult<Option<i32>> {
        let mut tx = self.pool.begin().await?;

        let current: Option<(i32, i32)> = sqlx::query_as(
            "SELECT id, quantity FROM cart WHERE user_id = $1 AND product_id = $2 FOR UPDATE",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((line_id, current)) = current else {
            tx.rollback().await?;
            return Ok(None);
        };

        let remaining = (current - quantity).max(0);
        if remaining == 0 {
            sqlx::query("DELETE FROM cart WHERE id = $1")
                .bind(line_id)
                .execute(&mut *tx)
                .await?;
        } else {
            sqlx::query("UPDATE cart SET quantity = $2 WHERE id = $1")
                .bind(line_id)
                .bind(remaining)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(remaining))
    }

    async fn list_items(&self, user_id: i32) -> StoreResult<Vec<CartItem>> {
        let items = sqlx::query_as::<_, CartItem>(
            r#"
            SELECT p.id, p.name, p.price, c.quantity
            FROM cart c
            JOIN products p ON p.id = c.product_id
            WHERE c.user_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn clear_cart(&self, user_id: i32) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM cart WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        price: model.price,
    }
}
