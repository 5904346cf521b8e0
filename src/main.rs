use std::{net::SocketAddr, sync::Arc};

use chrono::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use axum_storefront::{
    app::build_app,
    config::AppConfig,
    db::{create_pool, run_migrations},
    services::token_service::TokenIssuer,
    state::{AppState, AuthSettings},
    store::{MemoryStore, PgStore, Store},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,axum_storefront=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url).await?;
            run_migrations(&pool).await?;
            tracing::info!("using postgres store");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, using the in-memory store; data is lost on exit");
            Arc::new(MemoryStore::seeded())
        }
    };

    let state = AppState::new(
        store,
        TokenIssuer::new(
            config.jwt_secret.as_bytes(),
            Duration::hours(config.token_ttl_hours),
        ),
        AuthSettings {
            auto_register: config.auto_register,
            cookie_secure: config.cookie_secure,
        },
    );

    let app = build_app(state, &config.static_dir);

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!("listening on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
