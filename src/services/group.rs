//! Group membership rules.
//!
//! Every check that depends on the stored record runs inside the store's
//! atomic update, so capacity and duplicate checks cannot race with a
//! concurrent join or approval.

use std::sync::Arc;

use serde::Serialize;

use crate::database::Store;
use crate::database::models::{Group, GroupIndex, GroupStatus, NewGroup};
use crate::error::ServiceError;
use crate::utils::now_millis;

/// Input of [`GroupService::create_group`].
#[derive(Debug, Clone)]
pub struct CreateGroup {
    pub group_name: String,
    pub description: Option<String>,
    pub creator_id: String,
    pub max_members: Option<u32>,
    pub group_image: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub enum GroupFilter<'a> {
    AllOpen,
    CreatedBy(&'a str),
    MemberOf(&'a str),
}

/// List view of a group with computed counts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub id: String,
    pub group_name: String,
    pub description: Option<String>,
    pub creator_id: String,
    pub status: GroupStatus,
    pub max_members: Option<u32>,
    pub member_count: usize,
    pub pending_count: usize,
    pub created_at: i64,
    pub group_image: Option<String>,
}

impl From<Group> for GroupSummary {
    fn from(group: Group) -> Self {
        Self {
            member_count: group.member_count(),
            pending_count: group.pending_members.len(),
            id: group.id,
            group_name: group.group_name,
            description: group.description,
            creator_id: group.creator_id,
            status: group.status,
            max_members: group.max_members,
            created_at: group.created_at,
            group_image: group.group_image,
        }
    }
}

pub struct GroupService {
    store: Arc<dyn Store>,
    max_members_limit: u32,
}

impl GroupService {
    pub fn new(store: Arc<dyn Store>, max_members_limit: u32) -> Self {
        Self {
            store,
            max_members_limit,
        }
    }

    pub async fn create_group(&self, req: CreateGroup) -> Result<String, ServiceError> {
        let group_name = req.group_name.trim();
        if group_name.is_empty() {
            return Err(ServiceError::Validation("groupName is required".into()));
        }
        require_user_id(&req.creator_id, "creatorId")?;

        if let Some(max) = req.max_members {
            if max == 0 || max > self.max_members_limit {
                return Err(ServiceError::Validation(format!(
                    "maxMembers must be between 1 and {}",
                    self.max_members_limit
                )));
            }
        }

        let description = req
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let group_id = self
            .store
            .insert_group(NewGroup {
                group_name: group_name.to_string(),
                description,
                creator_id: req.creator_id.clone(),
                max_members: req.max_members,
                group_image: req.group_image,
                created_at: now_millis(),
            })
            .await
            .inspect_err(|e| tracing::error!("Failed to create group: {}", e))?;

        tracing::info!(
            "User {} created group {} ({})",
            req.creator_id,
            group_id,
            group_name
        );
        Ok(group_id)
    }

    /// Puts `user_id` on the pending list. Repeating the request while it is
    /// still pending succeeds without adding a second entry.
    pub async fn request_to_join(&self, group_id: &str, user_id: &str) -> Result<(), ServiceError> {
        require_user_id(user_id, "userId")?;
        let user = user_id.to_string();

        self.store
            .update_group(
                group_id,
                Box::new(move |group: &mut Group| {
                    if group.is_member(&user) {
                        return Err(ServiceError::Conflict(
                            "User is already a member of this group".into(),
                        ));
                    }
                    ensure_open(group)?;
                    ensure_capacity(group)?;
                    if !group.is_pending(&user) {
                        group.pending_members.push(user);
                    }
                    Ok(())
                }),
            )
            .await?;

        tracing::info!("User {} requested to join group {}", user_id, group_id);
        Ok(())
    }

    pub async fn approve_request(
        &self,
        group_id: &str,
        user_id: &str,
        creator_id: &str,
    ) -> Result<(), ServiceError> {
        require_user_id(user_id, "userId")?;
        let user = user_id.to_string();
        let caller = creator_id.to_string();

        self.store
            .update_group(
                group_id,
                Box::new(move |group: &mut Group| {
                    ensure_creator(group, &caller)?;
                    ensure_pending(group, &user)?;
                    ensure_open(group)?;
                    ensure_capacity(group)?;

                    group.pending_members.retain(|m| *m != user);
                    if !group.approved_members.contains(&user) {
                        group.approved_members.push(user.clone());
                    }
                    group.members.push(user);
                    Ok(())
                }),
            )
            .await?;

        tracing::info!(
            "User {} approved {} into group {}",
            creator_id,
            user_id,
            group_id
        );
        Ok(())
    }

    /// Creator declines a pending request; the user may ask again later.
    pub async fn reject_request(
        &self,
        group_id: &str,
        user_id: &str,
        creator_id: &str,
    ) -> Result<(), ServiceError> {
        require_user_id(user_id, "userId")?;
        let user = user_id.to_string();
        let caller = creator_id.to_string();

        self.store
            .update_group(
                group_id,
                Box::new(move |group: &mut Group| {
                    ensure_creator(group, &caller)?;
                    ensure_pending(group, &user)?;
                    group.pending_members.retain(|m| *m != user);
                    Ok(())
                }),
            )
            .await?;

        tracing::info!(
            "User {} rejected {} from group {}",
            creator_id,
            user_id,
            group_id
        );
        Ok(())
    }

    /// The requesting user withdraws their own pending request.
    pub async fn cancel_request(&self, group_id: &str, user_id: &str) -> Result<(), ServiceError> {
        require_user_id(user_id, "userId")?;
        let user = user_id.to_string();

        self.store
            .update_group(
                group_id,
                Box::new(move |group: &mut Group| {
                    ensure_pending(group, &user)?;
                    group.pending_members.retain(|m| *m != user);
                    Ok(())
                }),
            )
            .await?;

        tracing::info!("User {} cancelled request to group {}", user_id, group_id);
        Ok(())
    }

    /// Stops the group from taking new members. Closing twice is a no-op.
    pub async fn close_group(&self, group_id: &str, creator_id: &str) -> Result<(), ServiceError> {
        let caller = creator_id.to_string();

        self.store
            .update_group(
                group_id,
                Box::new(move |group: &mut Group| {
                    ensure_creator(group, &caller)?;
                    group.status = GroupStatus::Closed;
                    Ok(())
                }),
            )
            .await?;

        tracing::info!("User {} closed group {}", creator_id, group_id);
        Ok(())
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Group, ServiceError> {
        self.store
            .get_group(group_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Group {} not found", group_id)))
    }

    pub async fn list_groups(
        &self,
        filter: GroupFilter<'_>,
    ) -> Result<Vec<GroupSummary>, ServiceError> {
        let index = match filter {
            GroupFilter::AllOpen => GroupIndex::ByStatus(GroupStatus::Open),
            GroupFilter::CreatedBy(user_id) => GroupIndex::ByCreator(user_id),
            GroupFilter::MemberOf(user_id) => GroupIndex::ByMember(user_id),
        };

        let groups = self.store.scan_groups(index).await?;
        Ok(groups.into_iter().map(GroupSummary::from).collect())
    }
}

fn require_user_id(user_id: &str, field: &str) -> Result<(), ServiceError> {
    if user_id.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn ensure_creator(group: &Group, caller: &str) -> Result<(), ServiceError> {
    if group.creator_id != caller {
        return Err(ServiceError::Unauthorized(
            "Only the group creator can do this".into(),
        ));
    }
    Ok(())
}

fn ensure_pending(group: &Group, user_id: &str) -> Result<(), ServiceError> {
    if !group.is_pending(user_id) {
        return Err(ServiceError::Conflict(format!(
            "User {} has no pending request",
            user_id
        )));
    }
    Ok(())
}

fn ensure_open(group: &Group) -> Result<(), ServiceError> {
    if !group.is_open() {
        return Err(ServiceError::Conflict("Group is closed".into()));
    }
    Ok(())
}

fn ensure_capacity(group: &Group) -> Result<(), ServiceError> {
    if group.is_full() {
        return Err(ServiceError::Conflict("Group is full".into()));
    }
    Ok(())
}
