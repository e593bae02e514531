use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::{config::Config, error::AppError};

/// Fixed-window request counter per client IP, kept in redis.
#[derive(Clone)]
pub struct RateLimiter {
    redis: Arc<redis::Client>,
    config: Arc<Config>,
}

impl RateLimiter {
    pub fn new(redis: redis::Client, config: Config) -> Self {
        Self {
            redis: Arc::new(redis),
            config: Arc::new(config),
        }
    }

    pub async fn check_rate_limit(
        self: Arc<Self>,
        req: Request<Body>,
        next: Next,
    ) -> Result<Response, AppError> {
        let ip = client_ip(&req);
        let key = format!("rate_limit:{}", ip);
        let window = self.config.rate_limit_window().as_secs();

        let mut conn = self
            .redis
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("redis unavailable: {}", e)))?;

        let (count,): (u32,) = window_pipeline(&key, window)
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("redis rate-limit pipeline failed: {}", e)))?;

        if count > self.config.rate_limit_requests {
            tracing::info!("Rate limited {} ({} requests)", ip, count);
            return Err(AppError::RateLimited(window));
        }

        Ok(next.run(req).await)
    }
}

/// INCR plus EXPIRE NX in one MULTI/EXEC, so a counter never outlives its window.
fn window_pipeline(key: &str, window: u64) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .incr(key, 1)
        .cmd("EXPIRE")
        .arg(key)
        .arg(window)
        .arg("NX")
        .ignore();
    pipe
}

/// `x-real-ip`, then the first `x-forwarded-for` entry, then the socket peer.
fn client_ip(req: &Request<Body>) -> String {
    let remote_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string());

    req.headers()
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
        .or_else(|| {
            req.headers()
                .get("x-forwarded-for")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.split(',').find(|ip| !ip.trim().is_empty()))
        })
        .or(remote_ip.as_deref())
        .unwrap_or("unknown")
        .trim()
        .to_string()
}

pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    limiter.check_rate_limit(req, next).await
}
