pub mod group;
pub mod posts;
pub mod session;

use axum::{
    Router,
    routing::{get, post},
};

use crate::{AppState, error::ServiceError, middleware::auth_middleware, utils::Claims};

/// Resolves which user an identity field in a request body refers to.
///
/// The authenticated subject is authoritative. A body field naming somebody
/// else is rejected instead of being trusted.
pub(crate) fn acting_user(claims: &Claims, supplied: Option<&str>) -> Result<String, ServiceError> {
    match supplied.map(str::trim).filter(|s| !s.is_empty()) {
        Some(id) if id != claims.sub => Err(ServiceError::Unauthorized(format!(
            "{} does not match the signed-in user",
            id
        ))),
        _ => Ok(claims.sub.clone()),
    }
}

/// Authenticated API routes, relative to the configured base URI.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/groups",
            post(group::create_group).get(group::list_open_groups),
        )
        .route("/groups/created", get(group::list_created_groups))
        .route("/groups/joined", get(group::list_joined_groups))
        .route("/groups/{group_id}", get(group::get_group))
        .route("/groups/{group_id}/join", post(group::request_to_join))
        .route("/groups/{group_id}/approve", post(group::approve_request))
        .route("/groups/{group_id}/reject", post(group::reject_request))
        .route("/groups/{group_id}/cancel", post(group::cancel_request))
        .route("/groups/{group_id}/close", post(group::close_group))
        .route(
            "/groups/{group_id}/posts",
            post(posts::create_post).get(posts::list_posts),
        )
        .route("/session", get(session::current_session))
        .layer(axum::middleware::from_fn_with_state(state, auth_middleware))
}
