use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{ConnectCalendarRequest, CreateUserRequest, UpdateProfileRequest},
    responses::PublicProfile,
};
use crate::api::extractors::{host::HostUser, session::{SessionUser, SESSION_COOKIE}};
use crate::domain::models::{calendar_account::CalendarAccount, user::{normalize_username, User}};
use crate::error::AppError;
use std::sync::Arc;
use time::Duration;
use tower_cookies::{cookie::SameSite, Cookie, Cookies};
use tracing::info;

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = normalize_username(&payload.username)
        .ok_or_else(|| AppError::Validation("Username must have at least 3 letters, digits or hyphens".into()))?;

    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Name required".into()));
    }

    if state.user_repo.find_by_username(&username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken".into()));
    }

    let created = state.user_repo.create(&User::new(username, name)).await?;

    let mut session = Cookie::new(SESSION_COOKIE, created.id.clone());
    session.set_http_only(true);
    session.set_same_site(SameSite::Lax);
    session.set_path("/");
    session.set_max_age(Duration::days(7));
    cookies.signed(&state.config.session_key).add(session);

    info!("Host registered: {} ({})", created.username, created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    SessionUser(user): SessionUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.user_repo.update_bio(&user.id, &payload.bio).await?;
    info!("Profile updated: {}", user.username);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_profile(HostUser(host): HostUser) -> Result<impl IntoResponse, AppError> {
    Ok(Json(PublicProfile::from(host)))
}

pub async fn connect_calendar(
    State(state): State<Arc<AppState>>,
    SessionUser(user): SessionUser,
    Json(payload): Json<ConnectCalendarRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.access_token.trim().is_empty() {
        return Err(AppError::Validation("access_token required".into()));
    }

    let account = CalendarAccount::new(
        user.id.clone(),
        payload.access_token,
        payload.refresh_token,
        payload.expires_at,
        payload.scope,
    );
    let saved = state.account_repo.upsert(&account).await?;

    info!("Calendar connected for host {}", user.username);
    Ok((StatusCode::CREATED, Json(saved)))
}
