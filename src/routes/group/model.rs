use serde::{Deserialize, Serialize};

use crate::database::models::Group;
use crate::services::GroupSummary;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    #[serde(default)]
    pub group_name: String,
    pub description: Option<String>,
    /// must match the signed-in user when present
    pub creator_id: Option<String>,
    pub max_members: Option<u32>,
    pub group_image: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupResponse {
    pub success: bool,
    pub group_id: String,
}

/// Body shared by the join/approve/reject/cancel/close commands.
///
/// `user_id` names the user being admitted (approve/reject) or the caller
/// (join/cancel); `creator_id` names the caller for creator-only commands.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRequest {
    pub user_id: Option<String>,
    pub creator_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct GroupListResponse {
    pub success: bool,
    pub groups: Vec<GroupSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetail {
    #[serde(flatten)]
    pub group: Group,
    pub member_count: usize,
}

impl From<Group> for GroupDetail {
    fn from(group: Group) -> Self {
        Self {
            member_count: group.member_count(),
            group,
        }
    }
}
