use async_trait::async_trait;

use super::PgStore;
use crate::database::models::{NewUser, User, UserRow};
use crate::database::store::UserStore;
use crate::error::StoreError;

#[async_trait]
impl UserStore for PgStore {
    async fn upsert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, name, email, status, profile_picture, created_at)
            VALUES ($1, $2, LOWER(TRIM($3)), 'active', $4, $5)
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                profile_picture = COALESCE(EXCLUDED.profile_picture, users.profile_picture)
            RETURNING id, name, email, phone_number, status, profile_picture, created_at
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.profile_picture)
        .bind(user.created_at)
        .fetch_one(self.pool())
        .await?;

        Ok(User::from(row))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, phone_number, status, profile_picture, created_at
            FROM users
            WHERE email = LOWER(TRIM($1))
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(User::from))
    }
}
