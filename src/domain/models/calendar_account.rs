use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const GOOGLE_PROVIDER: &str = "google";

/// OAuth credential a host granted for mirroring bookings onto their calendar.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct CalendarAccount {
    pub id: String,
    pub user_id: String,
    pub provider: String,
    #[serde(skip_serializing)]
    pub access_token: String,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    /// Epoch seconds.
    pub expires_at: Option<i64>,
    pub scope: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl CalendarAccount {
    pub fn new(user_id: String, access_token: String, refresh_token: Option<String>, expires_at: Option<i64>, scope: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            provider: GOOGLE_PROVIDER.to_string(),
            access_token,
            refresh_token,
            expires_at,
            scope,
            updated_at: Utc::now(),
        }
    }

    /// Accounts without an expiry never need a refresh.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp < now.timestamp())
    }
}

/// Fresh tokens returned by the OAuth token endpoint.
#[derive(Debug, Clone)]
pub struct RefreshedTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<i64>,
    pub scope: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_is_expired() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
        let mut account = CalendarAccount::new("u1".into(), "tok".into(), None, None, None);
        assert!(!account.is_expired(now));

        account.expires_at = Some(now.timestamp() - 1);
        assert!(account.is_expired(now));

        account.expires_at = Some(now.timestamp() + 3600);
        assert!(!account.is_expired(now));
    }
}
