use std::sync::Arc;
use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use tracing::{info, warn};
use crate::domain::{
    models::booking::{Booking, BookingConfirmation, CalendarSyncStatus, NewBookingParams},
    ports::{BookingRepository, TimeIntervalRepository, UserRepository},
    services::{availability::{enumerate_hours, truncate_to_hour}, calendar_sync::CalendarSyncService},
};
use crate::error::AppError;

pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub notes: Option<String>,
    pub start: DateTime<Utc>,
}

/// Validates and commits bookings. The store's unique index on
/// `(user_id, start_time)` is what prevents double-booking; the conflict lookup
/// here only produces the error earlier.
pub struct BookingService {
    user_repo: Arc<dyn UserRepository>,
    interval_repo: Arc<dyn TimeIntervalRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    calendar_sync: Arc<CalendarSyncService>,
    timezone: Tz,
}

impl BookingService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        interval_repo: Arc<dyn TimeIntervalRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        calendar_sync: Arc<CalendarSyncService>,
        timezone: Tz,
    ) -> Self {
        Self { user_repo, interval_repo, booking_repo, calendar_sync, timezone }
    }

    pub async fn create_booking(
        &self,
        host_id: &str,
        request: BookingRequest,
        now: DateTime<Utc>,
    ) -> Result<BookingConfirmation, AppError> {
        let host = self.user_repo.find_by_id(host_id).await?
            .ok_or_else(|| AppError::NotFound("User does not exist".into()))?;

        let start = truncate_to_hour(request.start, self.timezone);
        if start <= now {
            return Err(AppError::PastDate);
        }

        let local = start.with_timezone(&self.timezone);
        let week_day = local.weekday().num_days_from_sunday() as i32;
        let interval = self.interval_repo.find_by_weekday(&host.id, week_day).await?;
        if !enumerate_hours(interval.as_ref()).contains(&local.hour()) {
            return Err(AppError::OutsideWorkingHours);
        }

        if self.booking_repo.find_by_start(&host.id, start).await?.is_some() {
            return Err(AppError::SlotConflict);
        }

        let booking = Booking::new(NewBookingParams {
            user_id: host.id.clone(),
            start,
            name: request.name,
            email: request.email,
            notes: request.notes,
        });

        let mut created = self.booking_repo.create(&booking).await?;
        info!("Booking committed: {} for host {} at {}", created.id, host.username, created.start_time);

        let calendar_sync = match self.calendar_sync.mirror(&created, &host, now).await {
            Ok(Some(external)) => {
                if let Err(e) = self.booking_repo.set_external_ref(&created.id, &external).await {
                    warn!("Failed to store calendar reference for booking {}: {}", created.id, e);
                }
                created.external_event_id = Some(external.event_id.clone());
                created.meeting_link = external.meeting_link.clone();
                CalendarSyncStatus::Synced {
                    external_event_id: external.event_id,
                    meeting_link: external.meeting_link,
                }
            }
            Ok(None) => {
                info!("Host {} has no connected calendar, skipping mirror", host.username);
                CalendarSyncStatus::NotConnected
            }
            Err(e) => {
                warn!("Calendar mirror failed for booking {}: {}", created.id, e);
                CalendarSyncStatus::Failed { reason: e.to_string() }
            }
        };

        Ok(BookingConfirmation {
            booking: created,
            calendar_sync,
        })
    }
}
