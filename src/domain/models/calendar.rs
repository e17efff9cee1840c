use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One cell of the month grid. Derived on every read, never persisted.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub disabled: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CalendarWeek {
    pub week: u32,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

impl MonthRef {
    pub fn of(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub week_days: Vec<String>,
    pub previous: MonthRef,
    pub next: MonthRef,
    pub weeks: Vec<CalendarWeek>,
}

/// Result of a day availability query. An empty `all_possible_hours` means the
/// host does not work that weekday at all.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DayAvailability {
    pub all_possible_hours: Vec<u32>,
    pub available_hours: Vec<u32>,
}
