pub mod booking;
pub mod calendar;
pub mod calendar_account;
pub mod time_interval;
pub mod user;
