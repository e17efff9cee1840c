use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use crate::domain::models::calendar::DayAvailability;
use crate::domain::models::time_interval::{WeekdayInterval, SLOT_MINUTES};

const HOURS_PER_DAY: u32 = 24;

/// First instant of `date` in `tz`. Falls forward one hour when local midnight
/// is skipped by a DST transition.
pub fn start_of_day(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// Last instant of `date` in `tz`. Clamps to the last representable instant on
/// the final supported date.
pub fn end_of_day(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    date.succ_opt()
        .and_then(|next| start_of_day(next, tz).checked_sub_signed(Duration::nanoseconds(1)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Absolute instant of local `hour:00` on `date`. `None` when the hour does not
/// exist locally (DST gap); ambiguous hours resolve to the earlier instant.
pub fn slot_instant(date: NaiveDate, hour: u32, tz: Tz) -> Option<DateTime<Utc>> {
    let local = date.and_hms_opt(hour, 0, 0)?;
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Truncates an instant to the top of its local hour.
pub fn truncate_to_hour(instant: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let local = instant.with_timezone(&tz);
    local
        .with_nanosecond(0)
        .and_then(|dt| dt.with_second(0))
        .and_then(|dt| dt.with_minute(0))
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(instant)
}

pub fn interval_for_date(date: NaiveDate, intervals: &[WeekdayInterval]) -> Option<&WeekdayInterval> {
    let week_day = date.weekday().num_days_from_sunday() as i32;
    intervals.iter().find(|i| i.week_day == week_day)
}

/// Every whole hour `h` with `start <= h * 60 < end`. No interval means the host
/// does not work that day, which is an empty list rather than an error.
pub fn enumerate_hours(interval: Option<&WeekdayInterval>) -> Vec<u32> {
    let Some(interval) = interval else {
        return Vec::new();
    };

    (0..HOURS_PER_DAY)
        .filter(|hour| {
            let minutes = *hour as i32 * SLOT_MINUTES;
            interval.time_start_in_minutes <= minutes && minutes < interval.time_end_in_minutes
        })
        .collect()
}

/// Drops candidate hours that are already booked or not strictly in the future.
/// The two predicates are independent. A day whose end-of-day is already behind
/// `now` short-circuits to an empty list.
pub fn filter_available(
    candidates: &[u32],
    date: NaiveDate,
    now: DateTime<Utc>,
    booked: &[DateTime<Utc>],
    tz: Tz,
) -> Vec<u32> {
    if end_of_day(date, tz) < now {
        return Vec::new();
    }

    let booked_hours: Vec<u32> = booked
        .iter()
        .map(|instant| instant.with_timezone(&tz))
        .filter(|local| local.date_naive() == date)
        .map(|local| local.hour())
        .collect();

    candidates
        .iter()
        .copied()
        .filter(|hour| {
            let is_booked = booked_hours.contains(hour);
            let is_past = slot_instant(date, *hour, tz).is_none_or(|instant| instant <= now);
            !is_booked && !is_past
        })
        .collect()
}

pub fn day_availability(
    date: NaiveDate,
    now: DateTime<Utc>,
    tz: Tz,
    intervals: &[WeekdayInterval],
    booked: &[DateTime<Utc>],
) -> DayAvailability {
    let all_possible_hours = enumerate_hours(interval_for_date(date, intervals));
    let available_hours = filter_available(&all_possible_hours, date, now, booked, tz);

    DayAvailability {
        all_possible_hours,
        available_hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(week_day: i32, start: i32, end: i32) -> WeekdayInterval {
        WeekdayInterval {
            id: format!("i{}", week_day),
            user_id: "host".into(),
            week_day,
            time_start_in_minutes: start,
            time_end_in_minutes: end,
        }
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn at(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.from_utc_datetime(&date.and_hms_opt(hour, minute, 0).unwrap())
    }

    #[test]
    fn test_enumerate_working_day() {
        let hours = enumerate_hours(Some(&interval(1, 480, 1080)));
        assert_eq!(hours, (8..18).collect::<Vec<_>>());
        assert!(!hours.contains(&18));
    }

    #[test]
    fn test_enumerate_without_interval_is_empty() {
        assert!(enumerate_hours(None).is_empty());
    }

    #[test]
    fn test_enumerate_full_day() {
        assert_eq!(enumerate_hours(Some(&interval(0, 0, 1440))).len(), 24);
    }

    #[test]
    fn test_booked_hour_is_excluded() {
        let date = monday();
        let now = at(date, 0, 0) - Duration::days(1);
        let candidates: Vec<u32> = (8..18).collect();

        let available = filter_available(&candidates, date, now, &[at(date, 10, 0)], chrono_tz::UTC);
        assert_eq!(available.len(), 9);
        assert!(!available.contains(&10));
    }

    #[test]
    fn test_past_hours_are_excluded() {
        let date = monday();
        let candidates: Vec<u32> = (8..18).collect();

        let available = filter_available(&candidates, date, at(date, 12, 30), &[], chrono_tz::UTC);
        assert_eq!(available, (13..18).collect::<Vec<_>>());
    }

    #[test]
    fn test_hour_equal_to_now_is_not_available() {
        let date = monday();
        let available = filter_available(&[12, 13], date, at(date, 12, 0), &[], chrono_tz::UTC);
        assert_eq!(available, vec![13]);
    }

    #[test]
    fn test_booking_on_other_day_does_not_block() {
        let date = monday();
        let now = at(date, 0, 0) - Duration::days(1);
        let other_day = at(date + Duration::days(1), 10, 0);

        let available = filter_available(&[10], date, now, &[other_day], chrono_tz::UTC);
        assert_eq!(available, vec![10]);
    }

    #[test]
    fn test_scenario_monday_with_one_booking() {
        let date = monday();
        let now = at(date, 9, 15);
        let intervals = vec![interval(1, 480, 1080)];

        let result = day_availability(date, now, chrono_tz::UTC, &intervals, &[at(date, 10, 0)]);
        assert_eq!(result.all_possible_hours, (8..18).collect::<Vec<_>>());
        assert_eq!(result.available_hours, (11..18).collect::<Vec<_>>());
    }

    #[test]
    fn test_past_day_keeps_possible_hours() {
        let date = monday();
        let now = at(date, 0, 0) + Duration::days(3);
        let intervals = vec![interval(1, 480, 1080)];

        let result = day_availability(date, now, chrono_tz::UTC, &intervals, &[]);
        assert_eq!(result.all_possible_hours.len(), 10);
        assert!(result.available_hours.is_empty());
    }

    #[test]
    fn test_day_without_rule_is_empty() {
        let date = monday();
        let intervals = vec![interval(2, 480, 1080)];
        let result = day_availability(date, at(date, 0, 0), chrono_tz::UTC, &intervals, &[]);
        assert!(result.all_possible_hours.is_empty());
        assert!(result.available_hours.is_empty());
    }

    #[test]
    fn test_day_fast_path_agrees_with_hour_check() {
        let date = monday();
        let candidates: Vec<u32> = (0..24).collect();
        let tz = chrono_tz::UTC;

        // Just before end of day the per-hour check alone already excludes everything.
        let late = end_of_day(date, tz) - Duration::seconds(1);
        assert!(filter_available(&candidates, date, late, &[], tz).is_empty());

        let after = end_of_day(date, tz) + Duration::seconds(1);
        assert!(filter_available(&candidates, date, after, &[], tz).is_empty());

        for hour in candidates {
            assert!(slot_instant(date, hour, tz).unwrap() <= end_of_day(date, tz));
        }
    }

    #[test]
    fn test_day_bounds_in_zone() {
        let tz = chrono_tz::America::Sao_Paulo;
        let date = monday();
        assert_eq!(start_of_day(date, tz), at(date, 3, 0));
        assert_eq!(end_of_day(date, tz), at(date + Duration::days(1), 3, 0) - Duration::nanoseconds(1));
    }

    #[test]
    fn test_dst_gap_hour_is_never_available() {
        // 2026-03-08 02:00 does not exist in New York.
        let tz = chrono_tz::America::New_York;
        let date = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        assert!(slot_instant(date, 2, tz).is_none());

        let now = at(date, 0, 0) - Duration::days(1);
        assert_eq!(filter_available(&[1, 2, 3], date, now, &[], tz), vec![1, 3]);
    }

    #[test]
    fn test_last_supported_date_does_not_overflow() {
        let tz = chrono_tz::UTC;
        assert_eq!(end_of_day(NaiveDate::MAX, tz), DateTime::<Utc>::MAX_UTC);

        let intervals: Vec<_> = (0..7).map(|d| interval(d, 480, 1080)).collect();
        let now = at(monday(), 0, 0);
        let result = day_availability(NaiveDate::MAX, now, tz, &intervals, &[]);
        assert_eq!(result.all_possible_hours.len(), 10);
        assert_eq!(result.available_hours, result.all_possible_hours);
    }

    #[test]
    fn test_truncate_to_hour() {
        let date = monday();
        assert_eq!(truncate_to_hour(at(date, 10, 42), chrono_tz::UTC), at(date, 10, 0));

        // Half-hour offset zones truncate to the local hour.
        let kolkata = chrono_tz::Asia::Kolkata;
        let truncated = truncate_to_hour(at(date, 10, 42), kolkata);
        assert_eq!(truncated, at(date, 10, 30));
    }
}
