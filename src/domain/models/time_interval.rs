use serde::{Deserialize, Serialize};
use uuid::Uuid;
use sqlx::FromRow;
use std::collections::HashSet;
use crate::error::AppError;

pub const MINUTES_PER_DAY: i32 = 1440;
pub const SLOT_MINUTES: i32 = 60;

/// A host's recurring working window for one weekday (0 = Sunday).
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq, Eq)]
pub struct WeekdayInterval {
    pub id: String,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub week_day: i32,
    pub time_start_in_minutes: i32,
    pub time_end_in_minutes: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct NewInterval {
    pub week_day: i32,
    pub start_time_in_minutes: i32,
    pub end_time_in_minutes: i32,
}

impl WeekdayInterval {
    pub fn new(user_id: String, interval: NewInterval) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            week_day: interval.week_day,
            time_start_in_minutes: interval.start_time_in_minutes,
            time_end_in_minutes: interval.end_time_in_minutes,
        }
    }
}

pub fn validate_intervals(intervals: &[NewInterval]) -> Result<(), AppError> {
    if intervals.is_empty() {
        return Err(AppError::Validation("At least one weekday must be enabled".into()));
    }

    let mut seen = HashSet::new();
    for interval in intervals {
        if !(0..=6).contains(&interval.week_day) {
            return Err(AppError::Validation(format!("Invalid week_day {}", interval.week_day)));
        }
        if !seen.insert(interval.week_day) {
            return Err(AppError::Validation(format!("Duplicate interval for week_day {}", interval.week_day)));
        }

        let (start, end) = (interval.start_time_in_minutes, interval.end_time_in_minutes);
        if start < 0 || end > MINUTES_PER_DAY || start >= end {
            return Err(AppError::Validation(format!("Invalid time range for week_day {}", interval.week_day)));
        }
        if start % SLOT_MINUTES != 0 || end % SLOT_MINUTES != 0 {
            return Err(AppError::Validation("Interval boundaries must be whole hours".into()));
        }
        if end - start < SLOT_MINUTES {
            return Err(AppError::Validation("End time must be at least 1 hour after start time".into()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(week_day: i32, start: i32, end: i32) -> NewInterval {
        NewInterval { week_day, start_time_in_minutes: start, end_time_in_minutes: end }
    }

    #[test]
    fn test_accepts_working_week() {
        let week: Vec<_> = (1..=5).map(|d| interval(d, 480, 1080)).collect();
        assert!(validate_intervals(&week).is_ok());
        assert!(validate_intervals(&[interval(0, 0, 1440)]).is_ok());
    }

    #[test]
    fn test_rejects_bad_intervals() {
        assert!(validate_intervals(&[]).is_err());
        assert!(validate_intervals(&[interval(7, 480, 1080)]).is_err());
        assert!(validate_intervals(&[interval(1, 480, 1080), interval(1, 600, 700)]).is_err());
        assert!(validate_intervals(&[interval(1, 1080, 480)]).is_err());
        assert!(validate_intervals(&[interval(1, 480, 1500)]).is_err());
        assert!(validate_intervals(&[interval(1, 480, 510)]).is_err());
        assert!(validate_intervals(&[interval(1, 490, 1090)]).is_err());
    }
}
