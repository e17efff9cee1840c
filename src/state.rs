use std::sync::Arc;
use crate::domain::ports::{
    UserRepository, TimeIntervalRepository, BookingRepository, CalendarAccountRepository,
    OAuthTokenService, CalendarService,
};
use crate::domain::services::{booking_service::BookingService, calendar_sync::CalendarSyncService};
use crate::config::Config;

pub struct Repositories {
    pub user_repo: Arc<dyn UserRepository>,
    pub interval_repo: Arc<dyn TimeIntervalRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub account_repo: Arc<dyn CalendarAccountRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub interval_repo: Arc<dyn TimeIntervalRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub account_repo: Arc<dyn CalendarAccountRepository>,
    pub calendar_sync: Arc<CalendarSyncService>,
    pub booking_service: Arc<BookingService>,
}

impl AppState {
    pub fn new(
        config: Config,
        repos: Repositories,
        oauth_service: Arc<dyn OAuthTokenService>,
        calendar_service: Arc<dyn CalendarService>,
    ) -> Self {
        let calendar_sync = Arc::new(CalendarSyncService::new(
            repos.account_repo.clone(),
            oauth_service,
            calendar_service,
        ));

        let booking_service = Arc::new(BookingService::new(
            repos.user_repo.clone(),
            repos.interval_repo.clone(),
            repos.booking_repo.clone(),
            calendar_sync.clone(),
            config.timezone,
        ));

        Self {
            config,
            user_repo: repos.user_repo,
            interval_repo: repos.interval_repo,
            booking_repo: repos.booking_repo,
            account_repo: repos.account_repo,
            calendar_sync,
            booking_service,
        }
    }
}
