use async_trait::async_trait;
use uuid::Uuid;

use super::PgStore;
use crate::database::models::{NewPost, Post, PostRow};
use crate::database::store::PostStore;
use crate::error::StoreError;

#[async_trait]
impl PostStore for PgStore {
    async fn insert_post(&self, post: NewPost) -> Result<String, StoreError> {
        let post_id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO posts (id, group_id, user_id, message, post_type, added_members, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&post_id)
        .bind(&post.group_id)
        .bind(&post.user_id)
        .bind(&post.message)
        .bind(&post.post_type)
        .bind(&post.added_members)
        .bind(post.created_at)
        .execute(self.pool())
        .await?;

        Ok(post_id)
    }

    async fn list_posts(&self, group_id: &str) -> Result<Vec<Post>, StoreError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, group_id, user_id, message, post_type, added_members, created_at
            FROM posts
            WHERE group_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(group_id)
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }
}
