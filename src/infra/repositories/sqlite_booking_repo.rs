use crate::domain::{models::booking::{Booking, ExternalRef}, ports::BookingRepository};
use crate::error::{is_unique_violation, AppError};
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::{DateTime, Utc};

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, user_id, guest_name, guest_email, notes, start_time, external_event_id, meeting_link, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.user_id).bind(&booking.guest_name).bind(&booking.guest_email)
            .bind(&booking.notes).bind(booking.start_time).bind(&booking.external_event_id).bind(&booking.meeting_link)
            .bind(booking.created_at)
            .fetch_one(&self.pool).await
            .map_err(|e| if is_unique_violation(&e) { AppError::SlotConflict } else { AppError::Database(e) })
    }
    async fn find_by_start(&self, user_id: &str, start: DateTime<Utc>) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE user_id = ? AND start_time = ?").bind(user_id).bind(start).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_start_times_by_range(&self, user_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, AppError> {
        sqlx::query_scalar::<_, DateTime<Utc>>("SELECT start_time FROM bookings WHERE user_id = ? AND start_time >= ? AND start_time <= ? ORDER BY start_time ASC").bind(user_id).bind(start).bind(end).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE user_id = ? ORDER BY start_time ASC").bind(user_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn set_external_ref(&self, id: &str, external: &ExternalRef) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE bookings SET external_event_id = ?, meeting_link = ? WHERE id = ?").bind(&external.event_id).bind(&external.meeting_link).bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Booking not found".into())); }
        Ok(())
    }
}
