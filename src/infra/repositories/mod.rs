pub mod sqlite_booking_repo;
pub mod sqlite_calendar_account_repo;
pub mod sqlite_time_interval_repo;
pub mod sqlite_user_repo;

pub mod postgres_booking_repo;
pub mod postgres_calendar_account_repo;
pub mod postgres_time_interval_repo;
pub mod postgres_user_repo;
