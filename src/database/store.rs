//! Storage traits the services depend on.
//!
//! Backends guarantee atomicity per record only. Anything that must be checked
//! and written together (capacity, duplicate membership) goes through
//! [`GroupStore::update_group`].

use async_trait::async_trait;

use crate::database::models::{Group, GroupIndex, NewGroup, NewPost, NewUser, Post, User};
use crate::error::{ServiceError, StoreError};

/// Read-modify-write step applied to a single group under the backend's lock.
/// Returning an error aborts the update without writing anything.
pub type GroupPatch = Box<dyn FnOnce(&mut Group) -> Result<(), ServiceError> + Send>;

#[async_trait]
pub trait GroupStore: Send + Sync {
    /// Persist a new group and return its generated id.
    async fn insert_group(&self, group: NewGroup) -> Result<String, StoreError>;

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, StoreError>;

    /// Lookup by secondary index. Order is newest first but callers must not rely on it.
    async fn scan_groups(&self, index: GroupIndex<'_>) -> Result<Vec<Group>, StoreError>;

    /// Apply `patch` to the current record atomically and return the result.
    /// A missing group yields `ServiceError::NotFound`.
    async fn update_group(&self, group_id: &str, patch: GroupPatch) -> Result<Group, ServiceError>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert_post(&self, post: NewPost) -> Result<String, StoreError>;

    /// Posts of a group, oldest first.
    async fn list_posts(&self, group_id: &str) -> Result<Vec<Post>, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert the user if the id is unknown, otherwise refresh name, email and
    /// picture and keep the creation time. Emails are stored lowercased.
    async fn upsert_user(&self, user: NewUser) -> Result<User, StoreError>;

    /// Case-insensitive; the newest user wins if several share the address.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// Everything the application needs from a backend.
pub trait Store: GroupStore + PostStore + UserStore {}

impl<T: GroupStore + PostStore + UserStore> Store for T {}

pub(crate) fn group_not_found(group_id: &str) -> ServiceError {
    ServiceError::NotFound(format!("Group {} not found", group_id))
}
