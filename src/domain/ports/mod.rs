use crate::domain::models::{
    user::User, time_interval::WeekdayInterval, booking::{Booking, ExternalRef},
    calendar_account::{CalendarAccount, RefreshedTokens},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the username is already taken.
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn update_bio(&self, id: &str, bio: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait TimeIntervalRepository: Send + Sync {
    /// Atomically replaces the host's whole weekly pattern.
    async fn replace_for_user(&self, user_id: &str, intervals: &[WeekdayInterval]) -> Result<Vec<WeekdayInterval>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<WeekdayInterval>, AppError>;
    async fn find_by_weekday(&self, user_id: &str, week_day: i32) -> Result<Option<WeekdayInterval>, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts under the `(user_id, start_time)` unique constraint. A violation is
    /// reported as `SlotConflict`.
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_start(&self, user_id: &str, start: DateTime<Utc>) -> Result<Option<Booking>, AppError>;
    async fn list_start_times_by_range(&self, user_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn set_external_ref(&self, id: &str, external: &ExternalRef) -> Result<(), AppError>;
}

#[async_trait]
pub trait CalendarAccountRepository: Send + Sync {
    async fn upsert(&self, account: &CalendarAccount) -> Result<CalendarAccount, AppError>;
    async fn find_by_user(&self, user_id: &str, provider: &str) -> Result<Option<CalendarAccount>, AppError>;
    async fn update_tokens(&self, account: &CalendarAccount) -> Result<(), AppError>;
}

/// Exchanges a refresh token for a new access token. A revoked or rejected grant
/// is `AuthExpired`; anything retryable is `Transient`.
#[async_trait]
pub trait OAuthTokenService: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, AppError>;
}

/// Mirrors a committed booking as a one-hour event on the host's calendar.
#[async_trait]
pub trait CalendarService: Send + Sync {
    async fn mirror_booking(&self, booking: &Booking, host: &User, account: &CalendarAccount) -> Result<ExternalRef, AppError>;
}
