//! Month grid construction for the calendar view
//!
//! A month renders as a fixed six-week, 42-cell grid with Sunday in the
//! first column. Leading cells carry the tail of the previous month and
//! trailing cells the head of the next, both flagged as outside the
//! displayed month.

use chrono::{Datelike, NaiveDate};

/// Number of cells in a month grid (6 weeks of 7 days)
pub const MONTH_GRID_CELLS: usize = 42;

/// One cell of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    /// Day-of-month number shown in the cell
    pub day: u32,

    /// Whether the cell belongs to the displayed month
    pub is_current_month: bool,
}

/// Build the 42-cell grid for the month containing `date`.
///
/// Cells run left to right, top to bottom. The count of leading cells
/// equals the weekday index of the first of the month (Sunday = 0), so
/// a month starting on Sunday has no leading cells at all.
pub fn month_grid(date: NaiveDate) -> Vec<DayCell> {
    let year = date.year();
    let month = date.month();

    let leading = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.weekday().num_days_from_sunday())
        .unwrap_or(0);

    let days = days_in_month(year, month);
    let (prev_year, prev_month) = step_back(year, month);
    let prev_days = days_in_month(prev_year, prev_month);

    let mut cells = Vec::with_capacity(MONTH_GRID_CELLS);
    for day in (prev_days - leading + 1)..=prev_days {
        cells.push(DayCell {
            day,
            is_current_month: false,
        });
    }
    for day in 1..=days {
        cells.push(DayCell {
            day,
            is_current_month: true,
        });
    }
    let trailing = MONTH_GRID_CELLS.saturating_sub(cells.len());
    for day in 1..=trailing as u32 {
        cells.push(DayCell {
            day,
            is_current_month: false,
        });
    }

    cells
}

/// Number of days in the given month. Months outside 1..=12 yield 0.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// First day of the month before the one containing `date`
pub fn prev_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = step_back(date.year(), date.month());
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// First day of the month after the one containing `date`
pub fn next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

fn step_back(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}
