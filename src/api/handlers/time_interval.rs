use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::SetTimeIntervalsRequest;
use crate::api::extractors::{host::HostUser, session::SessionUser};
use crate::domain::models::time_interval::{validate_intervals, WeekdayInterval};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn set_time_intervals(
    State(state): State<Arc<AppState>>,
    SessionUser(user): SessionUser,
    Json(payload): Json<SetTimeIntervalsRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_intervals(&payload.intervals)?;

    let intervals: Vec<WeekdayInterval> = payload.intervals
        .into_iter()
        .map(|interval| WeekdayInterval::new(user.id.clone(), interval))
        .collect();

    let saved = state.interval_repo.replace_for_user(&user.id, &intervals).await?;
    info!("Weekly availability set for {}: {} day(s)", user.username, saved.len());

    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn list_time_intervals(
    State(state): State<Arc<AppState>>,
    HostUser(host): HostUser,
) -> Result<impl IntoResponse, AppError> {
    let intervals = state.interval_repo.list_by_user(&host.id).await?;
    Ok(Json(intervals))
}
