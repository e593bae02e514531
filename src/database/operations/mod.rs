// Postgres backend

pub mod group;
pub mod post;
pub mod user;

use sqlx::PgPool;

/// Postgres-backed store. Clones share the same pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
