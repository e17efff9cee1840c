use std::sync::Arc;
use chrono::{DateTime, Utc};
use tracing::info;
use crate::domain::{
    models::{
        booking::{Booking, ExternalRef},
        calendar_account::{CalendarAccount, GOOGLE_PROVIDER},
        user::User,
    },
    ports::{CalendarAccountRepository, CalendarService, OAuthTokenService},
};
use crate::error::AppError;

pub struct CalendarSyncService {
    account_repo: Arc<dyn CalendarAccountRepository>,
    oauth: Arc<dyn OAuthTokenService>,
    calendar: Arc<dyn CalendarService>,
}

impl CalendarSyncService {
    pub fn new(
        account_repo: Arc<dyn CalendarAccountRepository>,
        oauth: Arc<dyn OAuthTokenService>,
        calendar: Arc<dyn CalendarService>,
    ) -> Self {
        Self { account_repo, oauth, calendar }
    }

    /// Loads the host's credential, refreshing and persisting it first when the
    /// access token has expired. `Ok(None)` means no calendar is connected.
    pub async fn authorized_account(&self, user_id: &str, now: DateTime<Utc>) -> Result<Option<CalendarAccount>, AppError> {
        let Some(mut account) = self.account_repo.find_by_user(user_id, GOOGLE_PROVIDER).await? else {
            return Ok(None);
        };

        if !account.is_expired(now) {
            return Ok(Some(account));
        }

        let refresh_token = account.refresh_token.clone().ok_or(AppError::AuthExpired)?;
        let tokens = self.oauth.refresh(&refresh_token).await?;

        account.access_token = tokens.access_token;
        account.refresh_token = tokens.refresh_token.or(account.refresh_token);
        account.expires_at = tokens.expires_at;
        account.scope = tokens.scope.or(account.scope);
        account.updated_at = now;

        self.account_repo.update_tokens(&account).await?;
        info!("Refreshed calendar credential for user {}", user_id);

        Ok(Some(account))
    }

    pub async fn mirror(&self, booking: &Booking, host: &User, now: DateTime<Utc>) -> Result<Option<ExternalRef>, AppError> {
        let Some(account) = self.authorized_account(&host.id, now).await? else {
            return Ok(None);
        };

        let external = self.calendar.mirror_booking(booking, host, &account).await?;
        Ok(Some(external))
    }
}
