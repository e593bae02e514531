use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use hackgroups::{
    AppState, build_router,
    config::Config,
    database::{MemoryStore, PgStore, Store},
    middleware::{RateLimiter, rate_limit},
};
use sqlx::Executor;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    let store: Arc<dyn Store> = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .after_connect(|conn, _meta| {
                    Box::pin(async move {
                        conn.execute("SET application_name = 'hackgroups';").await?;
                        Ok(())
                    })
                })
                .connect(database_url)
                .await
                .expect("Failed to connect to Postgres");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .expect("Failed to run migrations");

            tracing::info!("Using Postgres group store");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, groups are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState {
        store,
        config: config.clone(),
    };

    let router = build_router(state);

    let router = match &config.redis_url {
        Some(redis_url) => {
            let redis_client =
                redis::Client::open(redis_url.as_str()).expect("Failed to create Redis client");
            let limiter = Arc::new(RateLimiter::new(redis_client, config.clone()));
            router.layer(axum::middleware::from_fn_with_state(limiter, rate_limit))
        }
        None => {
            tracing::warn!("REDIS_URL not set, rate limiting disabled");
            router
        }
    };

    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding permissive CORS layer for development");
        router.layer(CorsLayer::permissive())
    };

    #[cfg(not(debug_assertions))]
    let router = router.layer(CorsLayer::new());

    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid SERVER_HOST, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!(
        "Server listening on {} (api at {}, domain @{})",
        addr,
        config.api_base_uri,
        config.allowed_email_domain
    );

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}
