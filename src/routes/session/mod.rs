use axum::{
    Extension,
    extract::{Json, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::AppError,
    result::ApiResponse,
    services::{Session, SessionService},
    utils::{Claims, success_to_api_response},
};

/// Who the caller is, what they may navigate to, and which groups they are in.
#[axum::debug_handler]
pub async fn current_session(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<(StatusCode, Json<ApiResponse<Session>>), AppError> {
    let session = SessionService::new(state.store.clone(), &state.config)
        .resolve(&claims)
        .await?;

    Ok((StatusCode::OK, success_to_api_response(session)))
}
