use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Booking {
    pub id: String,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub notes: Option<String>,
    pub start_time: DateTime<Utc>,
    pub external_event_id: Option<String>,
    pub meeting_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub user_id: String,
    pub start: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub notes: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: params.user_id,
            guest_name: params.name,
            guest_email: params.email,
            notes: params.notes,
            start_time: params.start,
            external_event_id: None,
            meeting_link: None,
            created_at: Utc::now(),
        }
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time + chrono::Duration::hours(1)
    }
}

/// Cross-reference to the event mirrored on the host's external calendar.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExternalRef {
    pub event_id: String,
    pub meeting_link: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalendarSyncStatus {
    Synced {
        external_event_id: String,
        meeting_link: Option<String>,
    },
    NotConnected,
    Failed {
        reason: String,
    },
}

#[derive(Debug, Serialize, Clone)]
pub struct BookingConfirmation {
    pub booking: Booking,
    pub calendar_sync: CalendarSyncStatus,
}
