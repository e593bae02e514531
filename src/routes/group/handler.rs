use axum::{
    Extension,
    extract::{Json, Path, Query, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::AppError,
    result::ApiResponse,
    routes::acting_user,
    services::{CreateGroup, GroupFilter, GroupService},
    utils::{Claims, success_to_api_response},
};

use super::model::{
    CreateGroupRequest, CreateGroupResponse, CreatedQuery, GroupDetail, GroupListResponse,
    MembershipRequest, SuccessResponse,
};

type HandlerResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), AppError>;

fn group_service(state: &AppState) -> GroupService {
    GroupService::new(state.store.clone(), state.config.max_members_limit)
}

fn ok() -> (StatusCode, Json<ApiResponse<SuccessResponse>>) {
    (
        StatusCode::OK,
        success_to_api_response(SuccessResponse { success: true }),
    )
}

#[axum::debug_handler]
pub async fn create_group(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateGroupRequest>,
) -> HandlerResult<CreateGroupResponse> {
    let creator_id = acting_user(&claims, req.creator_id.as_deref())?;
    tracing::debug!("User {} is creating group {}", creator_id, req.group_name);

    let group_id = group_service(&state)
        .create_group(CreateGroup {
            group_name: req.group_name,
            description: req.description,
            creator_id,
            max_members: req.max_members,
            group_image: req.group_image,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        success_to_api_response(CreateGroupResponse {
            success: true,
            group_id,
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_open_groups(State(state): State<AppState>) -> HandlerResult<GroupListResponse> {
    let groups = group_service(&state)
        .list_groups(GroupFilter::AllOpen)
        .await?;

    Ok((
        StatusCode::OK,
        success_to_api_response(GroupListResponse {
            success: true,
            groups,
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_created_groups(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<CreatedQuery>,
) -> HandlerResult<GroupListResponse> {
    let user_id = query
        .user_id
        .filter(|u| !u.trim().is_empty())
        .unwrap_or(claims.sub);

    let groups = group_service(&state)
        .list_groups(GroupFilter::CreatedBy(&user_id))
        .await?;

    Ok((
        StatusCode::OK,
        success_to_api_response(GroupListResponse {
            success: true,
            groups,
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_joined_groups(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> HandlerResult<GroupListResponse> {
    let groups = group_service(&state)
        .list_groups(GroupFilter::MemberOf(&claims.sub))
        .await?;

    Ok((
        StatusCode::OK,
        success_to_api_response(GroupListResponse {
            success: true,
            groups,
        }),
    ))
}

#[axum::debug_handler]
pub async fn get_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> HandlerResult<GroupDetail> {
    let group = group_service(&state).get_group(&group_id).await?;
    Ok((StatusCode::OK, success_to_api_response(GroupDetail::from(group))))
}

#[axum::debug_handler]
pub async fn request_to_join(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
    body: Option<Json<MembershipRequest>>,
) -> HandlerResult<SuccessResponse> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let user_id = acting_user(&claims, req.user_id.as_deref())?;
    group_service(&state)
        .request_to_join(&group_id, &user_id)
        .await?;
    Ok(ok())
}

#[axum::debug_handler]
pub async fn approve_request(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
    Json(req): Json<MembershipRequest>,
) -> HandlerResult<SuccessResponse> {
    let creator_id = acting_user(&claims, req.creator_id.as_deref())?;
    group_service(&state)
        .approve_request(&group_id, req.user_id.as_deref().unwrap_or_default(), &creator_id)
        .await?;
    Ok(ok())
}

#[axum::debug_handler]
pub async fn reject_request(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
    Json(req): Json<MembershipRequest>,
) -> HandlerResult<SuccessResponse> {
    let creator_id = acting_user(&claims, req.creator_id.as_deref())?;
    group_service(&state)
        .reject_request(&group_id, req.user_id.as_deref().unwrap_or_default(), &creator_id)
        .await?;
    Ok(ok())
}

#[axum::debug_handler]
pub async fn cancel_request(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
    body: Option<Json<MembershipRequest>>,
) -> HandlerResult<SuccessResponse> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let user_id = acting_user(&claims, req.user_id.as_deref())?;
    group_service(&state)
        .cancel_request(&group_id, &user_id)
        .await?;
    Ok(ok())
}

#[axum::debug_handler]
pub async fn close_group(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
    body: Option<Json<MembershipRequest>>,
) -> HandlerResult<SuccessResponse> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let creator_id = acting_user(&claims, req.creator_id.as_deref())?;
    group_service(&state)
        .close_group(&group_id, &creator_id)
        .await?;
    Ok(ok())
}
