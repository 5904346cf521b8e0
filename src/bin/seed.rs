use anyhow::Context;
use axum_storefront::{
    db::{create_pool, run_migrations},
    services::auth_service::hash_password,
};

const TEST_USERS: [&str; 2] = ["testUser1", "testUser2"];
const TEST_PASSWORD: &str = "7357[U53R]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set to seed the database")?;

    let pool = create_pool(&database_url).await?;
    // Products are seeded by the migrations.
    run_migrations(&pool).await?;

    for username in TEST_USERS {
        let password_hash = hash_password(TEST_PASSWORD)?;
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (username) DO UPDATE SET password_hash = EXCLUDED.password_hash
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&pool)
        .await?;
        println!("Ensured user {username} (id={id})");
    }

    println!("Seed completed");
    Ok(())
}
