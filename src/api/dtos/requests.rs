use crate::domain::models::time_interval::NewInterval;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub username: String,
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub bio: String,
}

#[derive(Deserialize)]
pub struct SetTimeIntervalsRequest {
    pub intervals: Vec<NewInterval>,
}

#[derive(Deserialize)]
pub struct ConnectCalendarRequest {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<i64>,
    pub scope: Option<String>,
}

#[derive(Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub name: String,
    pub email: String,
    pub observations: Option<String>,
    pub date: String,
}
