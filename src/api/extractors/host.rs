use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::collections::HashMap;
use crate::domain::models::user::User;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::Span;

/// Host named by the `{username}` path segment.
pub struct HostUser(pub User);

impl FromRequestParts<Arc<AppState>> for HostUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let params: Path<HashMap<String, String>> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Validation("Username required".into()))?;

        let username = params.get("username")
            .ok_or_else(|| AppError::Validation("Username required".into()))?;

        let user = state.user_repo.find_by_username(username).await?
            .ok_or_else(|| AppError::NotFound("User does not exist".into()))?;

        Span::current().record("host", user.username.as_str());
        Ok(HostUser(user))
    }
}
