use std::sync::Arc;

use axum::Router;

use config::Config;
use database::Store;

pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod result;
pub mod routes;
pub mod services;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Config,
}

/// The application router: authenticated API under `config.api_base_uri`,
/// with 5xx responses logged. Rate limiting and CORS are layered on in `main`.
pub fn build_router(state: AppState) -> Router {
    let api = routes::api_routes(state.clone());
    let base = state.config.api_base_uri.trim_end_matches('/');

    let router = if base.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(base, api)
    };

    router
        .layer(axum::middleware::from_fn(middleware::log_errors))
        .with_state(state)
}
