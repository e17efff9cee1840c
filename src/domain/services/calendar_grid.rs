use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use std::collections::HashSet;
use crate::domain::models::calendar::{CalendarDay, CalendarWeek, MonthGrid, MonthRef};
use crate::domain::models::time_interval::WeekdayInterval;
use crate::domain::services::{availability::end_of_day, week_days::week_day_names};
use crate::error::AppError;

const DAYS_PER_WEEK: usize = 7;

/// Lays `month` out as Sunday-first weeks of seven days. Days from the adjacent
/// months pad the first and last week. A day is disabled when it is padding,
/// when its last instant is already behind `now`, or when the host has no
/// interval for its weekday.
pub fn build_month_grid(
    month: MonthRef,
    now: DateTime<Utc>,
    tz: Tz,
    intervals: &[WeekdayInterval],
) -> Result<Vec<CalendarWeek>, AppError> {
    let first = month.first_day()
        .ok_or_else(|| AppError::Validation(format!("Invalid month {}-{}", month.year, month.month)))?;
    let last = month.next().first_day()
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| AppError::Validation("Month out of supported range".into()))?;

    let leading = first.weekday().num_days_from_sunday() as u64;
    let trailing = 6 - last.weekday().num_days_from_sunday() as u64;

    let grid_start = first.checked_sub_days(Days::new(leading))
        .ok_or_else(|| AppError::Validation("Month out of supported range".into()))?;
    let grid_end = last.checked_add_days(Days::new(trailing))
        .ok_or_else(|| AppError::Validation("Month out of supported range".into()))?;

    let working_days: HashSet<i32> = intervals.iter().map(|i| i.week_day).collect();

    let days: Vec<CalendarDay> = grid_start
        .iter_days()
        .take_while(|date| *date <= grid_end)
        .map(|date| CalendarDay {
            date,
            disabled: is_disabled(date, first, last, now, tz, &working_days),
        })
        .collect();

    Ok(days
        .chunks(DAYS_PER_WEEK)
        .enumerate()
        .map(|(index, chunk)| CalendarWeek {
            week: index as u32 + 1,
            days: chunk.to_vec(),
        })
        .collect())
}

fn is_disabled(
    date: NaiveDate,
    first: NaiveDate,
    last: NaiveDate,
    now: DateTime<Utc>,
    tz: Tz,
    working_days: &HashSet<i32>,
) -> bool {
    let is_filler = date < first || date > last;
    let is_past = end_of_day(date, tz) < now;
    let has_no_rule = !working_days.contains(&(date.weekday().num_days_from_sunday() as i32));

    is_filler || is_past || has_no_rule
}

pub fn month_view(
    month: MonthRef,
    now: DateTime<Utc>,
    tz: Tz,
    intervals: &[WeekdayInterval],
) -> Result<MonthGrid, AppError> {
    let weeks = build_month_grid(month, now, tz, intervals)?;
    let month_name = month.first_day()
        .map(|d| d.format("%B").to_string())
        .unwrap_or_default();

    Ok(MonthGrid {
        year: month.year,
        month: month.month,
        month_name,
        week_days: week_day_names(true),
        previous: month.previous(),
        next: month.next(),
        weeks,
    })
}
