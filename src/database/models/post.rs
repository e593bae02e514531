use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A message posted inside a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub group_id: String,
    pub user_id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub added_members: Vec<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub group_id: String,
    pub user_id: String,
    pub message: String,
    pub post_type: String,
    pub added_members: Vec<String>,
    pub created_at: i64,
}

impl NewPost {
    pub fn into_post(self, id: String) -> Post {
        Post {
            id,
            group_id: self.group_id,
            user_id: self.user_id,
            message: self.message,
            post_type: self.post_type,
            added_members: self.added_members,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct PostRow {
    pub id: String,
    pub group_id: String,
    pub user_id: String,
    pub message: String,
    pub post_type: String,
    pub added_members: Vec<String>,
    pub created_at: i64,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            group_id: row.group_id,
            user_id: row.user_id,
            message: row.message,
            post_type: row.post_type,
            added_members: row.added_members,
            created_at: row.created_at,
        }
    }
}
