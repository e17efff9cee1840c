use axum::{extract::{Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{AvailabilityQuery, CreateBookingRequest, MonthQuery},
    responses::AvailabilityResponse,
};
use crate::api::extractors::host::HostUser;
use crate::domain::models::calendar::MonthRef;
use crate::domain::services::{
    availability::{day_availability, end_of_day, start_of_day},
    booking_service::BookingRequest,
    calendar_grid::month_view,
};
use crate::error::AppError;
use std::sync::Arc;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

pub async fn get_month_grid(
    State(state): State<Arc<AppState>>,
    HostUser(host): HostUser,
    Query(params): Query<MonthQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tz = state.config.timezone;
    let now = Utc::now();
    let current = MonthRef::of(now.with_timezone(&tz).date_naive());

    let month = MonthRef {
        year: params.year.unwrap_or(current.year),
        month: params.month.unwrap_or(current.month),
    };

    let intervals = state.interval_repo.list_by_user(&host.id).await?;
    let grid = month_view(month, now, tz, &intervals)?;

    Ok(Json(grid))
}

pub async fn get_day_availability(
    State(state): State<Arc<AppState>>,
    HostUser(host): HostUser,
    Query(params): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date_str = params.date.ok_or(AppError::Validation("Date not provided".into()))?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;

    let tz = state.config.timezone;
    let intervals = state.interval_repo.list_by_user(&host.id).await?;
    let booked = state.booking_repo
        .list_start_times_by_range(&host.id, start_of_day(date, tz), end_of_day(date, tz))
        .await?;

    let availability = day_availability(date, Utc::now(), tz, &intervals, &booked);

    Ok(Json(AvailabilityResponse {
        date: date_str,
        availability,
    }))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    HostUser(host): HostUser,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Name required".into()));
    }
    if !is_plausible_email(&payload.email) {
        return Err(AppError::Validation("Invalid email".into()));
    }

    let start = DateTime::parse_from_rfc3339(&payload.date)
        .map_err(|_| AppError::Validation("Invalid date format (RFC 3339 expected)".into()))?
        .with_timezone(&Utc);

    info!("create_booking: host {} requested {}", host.username, start);

    let request = BookingRequest {
        name,
        email: payload.email.trim().to_string(),
        notes: payload.observations.filter(|o| !o.trim().is_empty()),
        start,
    };

    let confirmation = state.booking_service.create_booking(&host.id, request, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}

fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_plausible_email() {
        assert!(is_plausible_email("ada@example.com"));
        assert!(!is_plausible_email("ada@example"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("ada.example.com"));
    }
}
