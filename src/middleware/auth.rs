use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::{AppState, error::AppError, utils::verify_token};

/// Verifies the identity provider's bearer token and the college email domain,
/// then hands the claims to handlers as an `Extension<Claims>`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AppError::Unauthenticated)?;

    let claims = verify_token(auth.token(), &state.config).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        AppError::Unauthenticated
    })?;

    if !state.config.is_allowed_email(&claims.email) {
        tracing::warn!(
            "Denied {} ({}): outside @{}",
            claims.sub,
            claims.email,
            state.config.allowed_email_domain
        );
        return Err(AppError::DomainNotAllowed);
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
