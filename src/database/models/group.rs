use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupStatus {
    Open,
    Closed,
}

impl GroupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupStatus::Open => "open",
            GroupStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(GroupStatus::Open),
            "closed" => Ok(GroupStatus::Closed),
            other => Err(StoreError::Corrupt(format!("unknown group status `{}`", other))),
        }
    }
}

/// A hackathon group document.
///
/// `members`, `pending_members` and `approved_members` are ordered sets: the
/// service never inserts a user twice into the same list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub group_name: String,
    pub description: Option<String>,
    pub creator_id: String,
    pub status: GroupStatus,
    /// `None` means the group has no capacity limit
    pub max_members: Option<u32>,
    pub members: Vec<String>,
    pub pending_members: Vec<String>,
    pub approved_members: Vec<String>,
    pub posts: Vec<String>,
    /// milliseconds since epoch
    pub created_at: i64,
    pub group_image: Option<String>,
}

impl Group {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m == user_id)
    }

    pub fn is_pending(&self, user_id: &str) -> bool {
        self.pending_members.iter().any(|m| m == user_id)
    }

    pub fn is_full(&self) -> bool {
        self.max_members
            .is_some_and(|max| self.members.len() >= max as usize)
    }

    pub fn is_open(&self) -> bool {
        self.status == GroupStatus::Open
    }
}

/// Fields supplied when a group is inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub group_name: String,
    pub description: Option<String>,
    pub creator_id: String,
    pub max_members: Option<u32>,
    pub group_image: Option<String>,
    pub created_at: i64,
}

impl NewGroup {
    /// Builds the initial document: open, with the creator as sole member.
    pub fn into_group(self, id: String) -> Group {
        Group {
            id,
            group_name: self.group_name,
            description: self.description,
            members: vec![self.creator_id.clone()],
            creator_id: self.creator_id,
            status: GroupStatus::Open,
            max_members: self.max_members,
            pending_members: Vec::new(),
            approved_members: Vec::new(),
            posts: Vec::new(),
            created_at: self.created_at,
            group_image: self.group_image,
        }
    }
}

/// Secondary lookups supported by `GroupStore::scan_groups`.
#[derive(Debug, Clone, Copy)]
pub enum GroupIndex<'a> {
    ByCreator(&'a str),
    ByMember(&'a str),
    ByStatus(GroupStatus),
}

impl GroupIndex<'_> {
    pub fn matches(&self, group: &Group) -> bool {
        match self {
            GroupIndex::ByCreator(creator_id) => group.creator_id == *creator_id,
            GroupIndex::ByMember(user_id) => group.is_member(user_id),
            GroupIndex::ByStatus(status) => group.status == *status,
        }
    }
}

/// Row layout of the `groups` table.
#[derive(Debug, FromRow)]
pub struct GroupRow {
    pub id: String,
    pub group_name: String,
    pub description: Option<String>,
    pub creator_id: String,
    pub status: String,
    pub max_members: Option<i32>,
    pub members: Vec<String>,
    pub pending_members: Vec<String>,
    pub approved_members: Vec<String>,
    pub posts: Vec<String>,
    pub created_at: i64,
    pub group_image: Option<String>,
}

impl TryFrom<GroupRow> for Group {
    type Error = StoreError;

    fn try_from(row: GroupRow) -> Result<Self, Self::Error> {
        let max_members = row
            .max_members
            .map(u32::try_from)
            .transpose()
            .map_err(|_| StoreError::Corrupt(format!("negative max_members on {}", row.id)))?;

        Ok(Group {
            status: row.status.parse()?,
            id: row.id,
            group_name: row.group_name,
            description: row.description,
            creator_id: row.creator_id,
            max_members,
            members: row.members,
            pending_members: row.pending_members,
            approved_members: row.approved_members,
            posts: row.posts,
            created_at: row.created_at,
            group_image: row.group_image,
        })
    }
}
