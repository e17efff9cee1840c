//! Property-based tests for the month grid and hour enumeration.

use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use proptest::prelude::*;
use scheduling_backend::domain::models::calendar::MonthRef;
use scheduling_backend::domain::models::time_interval::WeekdayInterval;
use scheduling_backend::domain::services::{
    availability::{enumerate_hours, filter_available, slot_instant},
    calendar_grid::build_month_grid,
};

fn arb_month() -> impl Strategy<Value = MonthRef> {
    (1990i32..=2100, 1u32..=12).prop_map(|(year, month)| MonthRef { year, month })
}

fn arb_timezone() -> impl Strategy<Value = Tz> {
    prop_oneof![
        Just(chrono_tz::UTC),
        Just(chrono_tz::America::Sao_Paulo),
        Just(chrono_tz::America::New_York),
        Just(chrono_tz::Europe::Berlin),
        Just(chrono_tz::Asia::Kolkata),
    ]
}

/// Whole-hour window with `start < end`.
fn arb_interval() -> impl Strategy<Value = WeekdayInterval> {
    (0i32..=6, 0i32..24)
        .prop_flat_map(|(week_day, start)| (Just(week_day), Just(start), (start + 1)..=24))
        .prop_map(|(week_day, start, end)| WeekdayInterval {
            id: "i".into(),
            user_id: "host".into(),
            week_day,
            time_start_in_minutes: start * 60,
            time_end_in_minutes: end * 60,
        })
}

fn arb_working_days() -> impl Strategy<Value = Vec<WeekdayInterval>> {
    proptest::collection::vec(any::<bool>(), 7).prop_map(|works| {
        (0i32..7)
            .filter(|week_day| works[*week_day as usize])
            .map(|week_day| WeekdayInterval {
                id: format!("i{}", week_day),
                user_id: "host".into(),
                week_day,
                time_start_in_minutes: 480,
                time_end_in_minutes: 1080,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn grid_is_whole_sunday_first_weeks(month in arb_month(), tz in arb_timezone(), intervals in arb_working_days()) {
        let now = Utc.with_ymd_and_hms(1980, 1, 1, 0, 0, 0).unwrap();
        let weeks = build_month_grid(month, now, tz, &intervals).unwrap();

        prop_assert!((4..=6).contains(&weeks.len()));
        for (index, week) in weeks.iter().enumerate() {
            prop_assert_eq!(week.week as usize, index + 1);
            prop_assert_eq!(week.days.len(), 7);
            prop_assert_eq!(week.days[0].date.weekday(), Weekday::Sun);
        }

        let days: Vec<_> = weeks.iter().flat_map(|w| w.days.iter()).collect();
        for pair in days.windows(2) {
            prop_assert_eq!(pair[1].date, pair[0].date + Duration::days(1));
        }

        let first = NaiveDate::from_ymd_opt(month.year, month.month, 1).unwrap();
        let in_month = days.iter().filter(|d| d.date.year() == month.year && d.date.month() == month.month).count();
        let month_len = (month.next().first_day().unwrap() - first).num_days() as usize;
        prop_assert_eq!(in_month, month_len);
    }

    #[test]
    fn grid_disables_filler_and_non_working_days(month in arb_month(), intervals in arb_working_days()) {
        let now = Utc.with_ymd_and_hms(1980, 1, 1, 0, 0, 0).unwrap();
        let weeks = build_month_grid(month, now, chrono_tz::UTC, &intervals).unwrap();

        for day in weeks.iter().flat_map(|w| w.days.iter()) {
            let in_month = day.date.month() == month.month && day.date.year() == month.year;
            let works = intervals.iter().any(|i| i.week_day == day.date.weekday().num_days_from_sunday() as i32);
            prop_assert_eq!(day.disabled, !(in_month && works));
        }
    }

    #[test]
    fn enumeration_counts_whole_hours(interval in arb_interval()) {
        let hours = enumerate_hours(Some(&interval));
        let expected = (interval.time_end_in_minutes - interval.time_start_in_minutes) / 60;

        prop_assert_eq!(hours.len() as i32, expected);
        prop_assert!(hours.windows(2).all(|pair| pair[0] < pair[1]));
        for hour in hours {
            let minutes = hour as i32 * 60;
            prop_assert!(interval.time_start_in_minutes <= minutes && minutes < interval.time_end_in_minutes);
        }
    }

    #[test]
    fn available_hours_exclude_bookings(
        interval in arb_interval(),
        booked in proptest::collection::vec(0u32..24, 0..6),
        tz in arb_timezone(),
    ) {
        let date = NaiveDate::from_ymd_opt(2040, 6, 4).unwrap();
        let now = Utc.with_ymd_and_hms(2040, 1, 1, 0, 0, 0).unwrap();
        let candidates = enumerate_hours(Some(&interval));
        let booked_instants: Vec<_> = booked.iter().filter_map(|h| slot_instant(date, *h, tz)).collect();

        let available = filter_available(&candidates, date, now, &booked_instants, tz);

        for hour in &available {
            prop_assert!(candidates.contains(hour));
            prop_assert!(!booked.contains(hour));
        }
        let free = candidates.iter().filter(|h| !booked.contains(*h)).count();
        prop_assert_eq!(available.len(), free);
    }
}
