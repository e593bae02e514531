use serde::{Deserialize, Serialize};

use crate::database::models::Post;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    #[serde(default)]
    pub added_members: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostResponse {
    pub success: bool,
    pub post_id: String,
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub success: bool,
    pub posts: Vec<Post>,
}
