use std::sync::Arc;

use crate::database::Store;
use crate::database::models::{Group, NewPost, Post};
use crate::error::ServiceError;
use crate::utils::now_millis;

const DEFAULT_POST_TYPE: &str = "message";

#[derive(Debug, Clone)]
pub struct CreatePost {
    pub group_id: String,
    pub user_id: String,
    pub message: String,
    pub post_type: Option<String>,
    pub added_members: Vec<String>,
}

pub struct PostService {
    store: Arc<dyn Store>,
}

impl PostService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Stores the post and appends its id to the group's post list.
    ///
    /// The two writes are separate per-record operations. If the second one
    /// fails the post exists but is not referenced from the group.
    pub async fn create_post(&self, req: CreatePost) -> Result<String, ServiceError> {
        let message = req.message.trim();
        if message.is_empty() {
            return Err(ServiceError::Validation("message is required".into()));
        }

        let group = self.member_group(&req.group_id, &req.user_id).await?;

        let post_type = req
            .post_type
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_POST_TYPE.to_string());

        let post_id = self
            .store
            .insert_post(NewPost {
                group_id: group.id.clone(),
                user_id: req.user_id.clone(),
                message: message.to_string(),
                post_type,
                added_members: req.added_members,
                created_at: now_millis(),
            })
            .await?;

        let reference = post_id.clone();
        self.store
            .update_group(
                &group.id,
                Box::new(move |group: &mut Group| {
                    group.posts.push(reference);
                    Ok(())
                }),
            )
            .await
            .inspect_err(|e| {
                tracing::error!("Post {} stored but not linked to group: {}", post_id, e)
            })?;

        tracing::debug!("User {} posted {} in group {}", req.user_id, post_id, group.id);
        Ok(post_id)
    }

    pub async fn list_posts(&self, group_id: &str, user_id: &str) -> Result<Vec<Post>, ServiceError> {
        let group = self.member_group(group_id, user_id).await?;
        Ok(self.store.list_posts(&group.id).await?)
    }

    async fn member_group(&self, group_id: &str, user_id: &str) -> Result<Group, ServiceError> {
        let group = self
            .store
            .get_group(group_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Group {} not found", group_id)))?;

        if !group.is_member(user_id) {
            return Err(ServiceError::Unauthorized(
                "Only group members can access posts".into(),
            ));
        }
        Ok(group)
    }
}
