use chrono::{Duration, NaiveDate};

/// Weekday names starting on Sunday, matching the `week_day` numbering of
/// weekly intervals. `short` yields three-letter names.
pub fn week_day_names(short: bool) -> Vec<String> {
    // 2021-06-06 is a Sunday.
    let sunday = NaiveDate::from_ymd_opt(2021, 6, 6).unwrap_or_default();
    let pattern = if short { "%a" } else { "%A" };

    (0..7)
        .map(|offset| (sunday + Duration::days(offset)).format(pattern).to_string())
        .collect()
}
