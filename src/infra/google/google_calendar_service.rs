use crate::domain::models::{booking::{Booking, ExternalRef}, calendar_account::CalendarAccount, user::User};
use crate::domain::ports::CalendarService;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

pub struct GoogleCalendarService {
    client: Client,
    api_url: String,
    summary_prefix: String,
}

impl GoogleCalendarService {
    pub fn new(api_url: String, summary_prefix: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            summary_prefix,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventTime {
    date_time: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Attendee {
    email: String,
    display_name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConferenceSolutionKey {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest {
    request_id: String,
    conference_solution_key: ConferenceSolutionKey,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConferenceData {
    create_request: CreateRequest,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventPayload {
    summary: String,
    description: Option<String>,
    start: EventTime,
    end: EventTime,
    attendees: Vec<Attendee>,
    conference_data: ConferenceData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventResponse {
    id: String,
    hangout_link: Option<String>,
}

fn build_payload(booking: &Booking, summary_prefix: &str) -> EventPayload {
    EventPayload {
        summary: format!("{}: {}", summary_prefix, booking.guest_name),
        description: booking.notes.clone(),
        start: EventTime { date_time: booking.start_time.to_rfc3339() },
        end: EventTime { date_time: booking.end_time().to_rfc3339() },
        attendees: vec![Attendee {
            email: booking.guest_email.clone(),
            display_name: booking.guest_name.clone(),
        }],
        conference_data: ConferenceData {
            create_request: CreateRequest {
                request_id: booking.id.clone(),
                conference_solution_key: ConferenceSolutionKey { kind: "hangoutsMeet".to_string() },
            },
        },
    }
}

#[async_trait]
impl CalendarService for GoogleCalendarService {
    async fn mirror_booking(&self, booking: &Booking, host: &User, account: &CalendarAccount) -> Result<ExternalRef, AppError> {
        let payload = build_payload(booking, &self.summary_prefix);

        let res = self.client.post(format!("{}/calendars/primary/events", self.api_url))
            .query(&[("conferenceDataVersion", "1")])
            .bearer_auth(&account.access_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Calendar API connection error: {}", e);
                error!("{}", msg);
                AppError::Transient(msg)
            })?;

        let status = res.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            error!("Calendar API rejected credential for host {}", host.username);
            return Err(AppError::AuthExpired);
        }
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Calendar API failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::Transient(msg));
        }

        let event: EventResponse = res.json().await
            .map_err(|e| AppError::Transient(format!("Invalid calendar API response: {}", e)))?;

        Ok(ExternalRef {
            event_id: event.id,
            meeting_link: event.hangout_link,
        })
    }
}
