use async_trait::async_trait;
use uuid::Uuid;

use super::PgStore;
use crate::database::models::{Group, GroupIndex, GroupRow, NewGroup};
use crate::database::store::{GroupPatch, GroupStore, group_not_found};
use crate::error::{ServiceError, StoreError};

const GROUP_COLUMNS: &str = r#"
    id, group_name, description, creator_id, status, max_members,
    members, pending_members, approved_members, posts, created_at, group_image
"#;

fn rows_to_groups(rows: Vec<GroupRow>) -> Result<Vec<Group>, StoreError> {
    rows.into_iter().map(Group::try_from).collect()
}

#[async_trait]
impl GroupStore for PgStore {
    async fn insert_group(&self, group: NewGroup) -> Result<String, StoreError> {
        let group_id = Uuid::new_v4().to_string();
        let group = group.into_group(group_id.clone());

        sqlx::query(
            r#"
            INSERT INTO groups (
                id, group_name, description, creator_id, status, max_members,
                members, pending_members, approved_members, posts, created_at, group_image
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(&group.id)
        .bind(&group.group_name)
        .bind(&group.description)
        .bind(&group.creator_id)
        .bind(group.status.as_str())
        .bind(group.max_members.map(|m| m as i32))
        .bind(&group.members)
        .bind(&group.pending_members)
        .bind(&group.approved_members)
        .bind(&group.posts)
        .bind(group.created_at)
        .bind(&group.group_image)
        .execute(self.pool())
        .await?;

        tracing::debug!("Inserted group {} ({})", group.id, group.group_name);
        Ok(group_id)
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, StoreError> {
        let row = sqlx::query_as::<_, GroupRow>(&format!(
            "SELECT {} FROM groups WHERE id = $1",
            GROUP_COLUMNS
        ))
        .bind(group_id)
        .fetch_optional(self.pool())
        .await?;

        row.map(Group::try_from).transpose()
    }

    async fn scan_groups(&self, index: GroupIndex<'_>) -> Result<Vec<Group>, StoreError> {
        let rows = match index {
            GroupIndex::ByCreator(creator_id) => {
                sqlx::query_as::<_, GroupRow>(&format!(
                    "SELECT {} FROM groups WHERE creator_id = $1 ORDER BY created_at DESC",
                    GROUP_COLUMNS
                ))
                .bind(creator_id)
                .fetch_all(self.pool())
                .await?
            }
            GroupIndex::ByMember(user_id) => {
                sqlx::query_as::<_, GroupRow>(&format!(
                    "SELECT {} FROM groups WHERE members @> ARRAY[$1]::TEXT[] ORDER BY created_at DESC",
                    GROUP_COLUMNS
                ))
                .bind(user_id)
                .fetch_all(self.pool())
                .await?
            }
            GroupIndex::ByStatus(status) => {
                sqlx::query_as::<_, GroupRow>(&format!(
                    "SELECT {} FROM groups WHERE status = $1 ORDER BY created_at DESC",
                    GROUP_COLUMNS
                ))
                .bind(status.as_str())
                .fetch_all(self.pool())
                .await?
            }
        };

        rows_to_groups(rows)
    }

    async fn update_group(&self, group_id: &str, patch: GroupPatch) -> Result<Group, ServiceError> {
        let mut tx = self.pool().begin().await?;

        // row lock held until commit; concurrent updates of the same group queue here
        let row = sqlx::query_as::<_, GroupRow>(&format!(
            "SELECT {} FROM groups WHERE id = $1 FOR UPDATE",
            GROUP_COLUMNS
        ))
        .bind(group_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| group_not_found(group_id))?;

        let mut group = Group::try_from(row)?;
        // an Err here drops `tx`, which rolls back
        patch(&mut group)?;

        sqlx::query(
            r#"
            UPDATE groups
            SET group_name = $2,
                description = $3,
                status = $4,
                max_members = $5,
                members = $6,
                pending_members = $7,
                approved_members = $8,
                posts = $9,
                group_image = $10
            WHERE id = $1
            "#,
        )
        .bind(&group.id)
        .bind(&group.group_name)
        .bind(&group.description)
        .bind(group.status.as_str())
        .bind(group.max_members.map(|m| m as i32))
        .bind(&group.members)
        .bind(&group.pending_members)
        .bind(&group.approved_members)
        .bind(&group.posts)
        .bind(&group.group_image)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(group)
    }
}
