use std::env;
use chrono_tz::Tz;
use tower_cookies::Key;
use tracing::warn;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub timezone: Tz,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_token_url: String,
    pub google_calendar_api_url: String,
    pub calendar_event_prefix: String,
    /// Signs the host session cookie.
    pub session_key: Key,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            timezone: parse_timezone(&env::var("SCHEDULE_TIMEZONE").unwrap_or_else(|_| "UTC".to_string())),
            google_client_id: env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
            google_client_secret: env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
            google_token_url: env::var("GOOGLE_TOKEN_URL").unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string()),
            google_calendar_api_url: env::var("GOOGLE_CALENDAR_API_URL").unwrap_or_else(|_| "https://www.googleapis.com/calendar/v3".to_string()),
            calendar_event_prefix: env::var("CALENDAR_EVENT_PREFIX").unwrap_or_else(|_| "Call".to_string()),
            session_key: session_key(env::var("SESSION_SECRET").ok()),
        }
    }
}

pub fn parse_timezone(name: &str) -> Tz {
    name.parse().unwrap_or_else(|_| {
        warn!("Unknown SCHEDULE_TIMEZONE '{}', falling back to UTC", name);
        chrono_tz::UTC
    })
}

/// Builds the cookie signing key from a secret of at least 64 bytes. Without a
/// usable secret a random key is generated and sessions end on restart.
pub fn session_key(secret: Option<String>) -> Key {
    match secret.map(|s| Key::try_from(s.as_bytes())) {
        Some(Ok(key)) => key,
        Some(Err(_)) => {
            warn!("SESSION_SECRET is shorter than 64 bytes, using a random session key");
            Key::generate()
        }
        None => {
            warn!("SESSION_SECRET not set, using a random session key");
            Key::generate()
        }
    }
}
