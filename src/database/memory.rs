//! In-memory backend.
//!
//! Suitable for local development without Postgres and for tests. Data lives
//! only as long as the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{Group, GroupIndex, NewGroup, NewPost, NewUser, Post, User};
use crate::database::store::{GroupPatch, GroupStore, PostStore, UserStore, group_not_found};
use crate::error::{ServiceError, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    groups: RwLock<HashMap<String, Group>>,
    posts: RwLock<Vec<Post>>,
    // keyed by user id
    users: RwLock<HashMap<String, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupStore for MemoryStore {
    async fn insert_group(&self, group: NewGroup) -> Result<String, StoreError> {
        let group_id = Uuid::new_v4().to_string();
        let group = group.into_group(group_id.clone());

        self.groups.write().await.insert(group_id.clone(), group);
        Ok(group_id)
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, StoreError> {
        Ok(self.groups.read().await.get(group_id).cloned())
    }

    async fn scan_groups(&self, index: GroupIndex<'_>) -> Result<Vec<Group>, StoreError> {
        let mut groups: Vec<Group> = self
            .groups
            .read()
            .await
            .values()
            .filter(|group| index.matches(group))
            .cloned()
            .collect();

        groups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(groups)
    }

    async fn update_group(&self, group_id: &str, patch: GroupPatch) -> Result<Group, ServiceError> {
        let mut groups = self.groups.write().await;
        let current = groups
            .get_mut(group_id)
            .ok_or_else(|| group_not_found(group_id))?;

        // patch a copy so a rejected update leaves the record untouched
        let mut updated = current.clone();
        patch(&mut updated)?;
        *current = updated.clone();

        Ok(updated)
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn insert_post(&self, post: NewPost) -> Result<String, StoreError> {
        let post_id = Uuid::new_v4().to_string();
        self.posts.write().await.push(post.into_post(post_id.clone()));
        Ok(post_id)
    }

    async fn list_posts(&self, group_id: &str) -> Result<Vec<Post>, StoreError> {
        Ok(self
            .posts
            .read()
            .await
            .iter()
            .filter(|post| post.group_id == group_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn upsert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let email = user.email.trim().to_ascii_lowercase();
        let mut users = self.users.write().await;

        let stored = match users.get_mut(&user.id) {
            Some(existing) => {
                existing.name = user.name;
                existing.email = email;
                if user.profile_picture.is_some() {
                    existing.profile_picture = user.profile_picture;
                }
                existing.clone()
            }
            None => {
                let created = NewUser { email, ..user }.into_user();
                users.insert(created.id.clone(), created.clone());
                created
            }
        };

        Ok(stored)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let email = email.trim().to_ascii_lowercase();
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|user| user.email == email)
            .max_by_key(|user| user.created_at)
            .cloned())
    }
}
