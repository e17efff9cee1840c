use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use crate::domain::models::user::User;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::Span;

pub const SESSION_COOKIE: &str = "scheduling.user_id";

/// Host that registered in this browser, identified by the signed session
/// cookie set on registration. Unsigned or tampered cookies are rejected.
pub struct SessionUser(pub User);

impl FromRequestParts<Arc<AppState>> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let cookies = parts.extensions.get::<Cookies>()
            .ok_or(AppError::Internal)?;

        let user_id = cookies.signed(&state.config.session_key)
            .get(SESSION_COOKIE)
            .ok_or(AppError::Unauthorized)?
            .value()
            .to_string();

        let user = state.user_repo.find_by_id(&user_id).await?
            .ok_or(AppError::Unauthorized)?;

        Span::current().record("host", user.username.as_str());
        Ok(SessionUser(user))
    }
}
