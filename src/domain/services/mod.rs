pub mod availability;
pub mod booking_service;
pub mod calendar_grid;
pub mod calendar_sync;
pub mod week_days;
