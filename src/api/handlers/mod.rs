pub mod health;
pub mod schedule;
pub mod time_interval;
pub mod user;
