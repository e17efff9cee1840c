pub mod google_calendar_service;
pub mod google_oauth_service;
