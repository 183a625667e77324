//! Calendar grid coordinates.
//!
//! Days are laid out in seven columns, Monday first. The first row holds
//! the week of January 1st; a new row starts after every Sunday.

use chrono::{Datelike, NaiveDate};

use crate::error::{ChartError, Result};

pub const DAYS_PER_WEEK: u32 = 7;
pub const MONTHS_PER_YEAR: usize = 12;

/// A day's position in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Weekday, Monday = 0.
    pub column: u32,
    /// Week row counted from the week of January 1st.
    pub row: u32,
}

/// All days of one month, in date order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGroup {
    /// 1-based month number.
    pub month: u32,
    pub name: String,
    pub days: Vec<DayCell>,
}

impl MonthGroup {
    pub fn first_day(&self) -> Option<&DayCell> {
        self.days.first()
    }
}

/// Grid positions for every day of `year`, grouped by month.
///
/// # Errors
/// Returns [`ChartError::InvalidYear`] if `year` is outside chrono's range.
pub fn month_groups(year: i32, names: &[String; MONTHS_PER_YEAR]) -> Result<Vec<MonthGroup>> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(ChartError::InvalidYear(year))?;
    NaiveDate::from_ymd_opt(year, 12, 31).ok_or(ChartError::InvalidYear(year))?;

    let mut groups: Vec<MonthGroup> = names
        .iter()
        .zip(1..)
        .map(|(name, month)| MonthGroup {
            month,
            name: name.clone(),
            days: Vec::with_capacity(31),
        })
        .collect();

    let offset = first.weekday().num_days_from_monday();
    for date in first.iter_days().take_while(|d| d.year() == year) {
        let index = offset + date.ordinal0();
        groups[date.month0() as usize].days.push(DayCell {
            date,
            column: index % DAYS_PER_WEEK,
            row: index / DAYS_PER_WEEK,
        });
    }

    Ok(groups)
}

/// Number of week rows covered by `groups`.
pub fn row_count(groups: &[MonthGroup]) -> u32 {
    groups
        .iter()
        .filter_map(|group| group.days.last())
        .map(|day| day.row + 1)
        .max()
        .unwrap_or(0)
}
