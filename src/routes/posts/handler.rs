use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::AppError,
    result::ApiResponse,
    services::{CreatePost, PostService},
    utils::{Claims, success_to_api_response},
};

use super::model::{CreatePostRequest, CreatePostResponse, PostListResponse};

#[axum::debug_handler]
pub async fn create_post(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatePostResponse>>), AppError> {
    let post_id = PostService::new(state.store.clone())
        .create_post(CreatePost {
            group_id,
            user_id: claims.sub,
            message: req.message,
            post_type: req.post_type,
            added_members: req.added_members,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        success_to_api_response(CreatePostResponse {
            success: true,
            post_id,
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_posts(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<PostListResponse>>), AppError> {
    let posts = PostService::new(state.store.clone())
        .list_posts(&group_id, &claims.sub)
        .await?;

    Ok((
        StatusCode::OK,
        success_to_api_response(PostListResponse {
            success: true,
            posts,
        }),
    ))
}
