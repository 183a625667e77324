//! Running log parser.
//!
//! One record per line, fields separated by spaces or tabs:
//!
//! ```text
//! # date      duration  km
//! 2022-01-03  31:20     5.2
//! 2022-01-05  1:02:10   10
//! 2022-01-07  -         3.0
//! 2022-01-09  45:00
//! ```
//!
//! Duration is `[H:]MM:SS`, distance is in kilometres, `-` marks a missing
//! value. Fields after the distance are free-form notes and are ignored.
//! Blank lines and `#` comments are skipped.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use winnow::combinator::{opt, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::error::{ChartError, Result};

/// Marker for a missing duration or distance.
pub const MISSING: &str = "-";

/// One logged activity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayRecord {
    pub date: NaiveDate,
    /// Moving time in seconds.
    pub duration_secs: Option<u32>,
    /// Distance in kilometres.
    pub distance: Option<f64>,
}

impl DayRecord {
    /// Combine two records of the same day. A field stays `None` only if
    /// both sides are missing it.
    pub fn merge(self, other: Self) -> Self {
        Self {
            date: self.date,
            duration_secs: combine(self.duration_secs, other.duration_secs, u32::saturating_add),
            distance: combine(self.distance, other.distance, |a, b| a + b),
        }
    }
}

fn combine<T>(a: Option<T>, b: Option<T>, add: impl FnOnce(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(add(a, b)),
        (a, b) => a.or(b),
    }
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Parse a running log.
///
/// # Errors
/// Returns [`ChartError::Parse`] with the 1-based line number of the first
/// malformed record.
pub fn parse_log(input: &str) -> Result<Vec<DayRecord>> {
    let mut records = Vec::new();
    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let record = parse_line(line).map_err(|message| ChartError::Parse {
            line: index + 1,
            message,
        })?;
        records.push(record);
    }
    log::debug!("parsed {} log records", records.len());
    Ok(records)
}

/// Read and parse a running log from disk.
///
/// # Errors
/// Returns [`ChartError::FileRead`] if the file cannot be read, or a parse
/// error as in [`parse_log`].
pub fn load_log(path: &Path) -> Result<Vec<DayRecord>> {
    let text = fs::read_to_string(path).map_err(|source| ChartError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_log(&text)
}

/// Merge same-day records and return them keyed by date.
pub fn aggregate_by_date(records: &[DayRecord]) -> BTreeMap<NaiveDate, DayRecord> {
    let mut days: BTreeMap<NaiveDate, DayRecord> = BTreeMap::new();
    for record in records {
        days.entry(record.date)
            .and_modify(|day| *day = day.merge(*record))
            .or_insert(*record);
    }
    days
}

// ─── Line parsing ─────────────────────────────────────────────────────────

fn parse_line(line: &str) -> std::result::Result<DayRecord, String> {
    let mut fields = line.split_whitespace();

    let date_field = fields.next().unwrap_or_default();
    let date = parse_date
        .parse(date_field)
        .map_err(|_| format!("invalid date `{date_field}`, expected YYYY-MM-DD"))?;

    let duration_secs = match fields.next() {
        None | Some(MISSING) => None,
        Some(field) => Some(
            parse_duration
                .parse(field)
                .map_err(|_| format!("invalid duration `{field}`, expected [H:]MM:SS"))?,
        ),
    };

    let distance = match fields.next() {
        None | Some(MISSING) => None,
        Some(field) => Some(
            parse_distance
                .parse(field)
                .map_err(|_| format!("invalid distance `{field}`, expected kilometres"))?,
        ),
    };

    Ok(DayRecord {
        date,
        duration_secs,
        distance,
    })
}

fn parse_uint(input: &mut &str) -> ModalResult<u32> {
    take_while(1.., |c: char| c.is_ascii_digit())
        .try_map(str::parse::<u32>)
        .parse_next(input)
}

fn parse_date(input: &mut &str) -> ModalResult<NaiveDate> {
    let (year, _, month, _, day) = (
        take_while(4, |c: char| c.is_ascii_digit()).try_map(str::parse::<i32>),
        '-',
        take_while(1..=2, |c: char| c.is_ascii_digit()).try_map(str::parse::<u32>),
        '-',
        take_while(1..=2, |c: char| c.is_ascii_digit()).try_map(str::parse::<u32>),
    )
        .parse_next(input)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ErrMode::Backtrack(ContextError::new()))
}

/// `MM:SS` or `H:MM:SS`, in seconds.
fn parse_duration(input: &mut &str) -> ModalResult<u32> {
    let first = parse_uint(input)?;
    let _ = ':'.parse_next(input)?;
    let second = parse_uint(input)?;
    let third = opt(preceded(':', parse_uint)).parse_next(input)?;

    let (hours, minutes, seconds) = match third {
        Some(seconds) => (first, second, seconds),
        None => (0, first, second),
    };
    if seconds >= 60 || (third.is_some() && minutes >= 60) {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    hours
        .checked_mul(3600)
        .zip(minutes.checked_mul(60))
        .and_then(|(h, m)| h.checked_add(m)?.checked_add(seconds))
        .ok_or_else(|| ErrMode::Backtrack(ContextError::new()))
}

fn parse_distance(input: &mut &str) -> ModalResult<f64> {
    let start = *input;
    let _ = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    if input.starts_with('.') {
        *input = &input[1..];
        let _ = take_while::<_, _, ContextError>(0.., |c: char| c.is_ascii_digit()).parse_next(input);
    }
    let matched = &start[..start.len() - input.len()];
    matched
        .parse::<f64>()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_full_record() {
        let records = parse_log("2022-01-03\t31:20\t5.2\n").unwrap();
        assert_eq!(
            records,
            [DayRecord {
                date: date(2022, 1, 3),
                duration_secs: Some(31 * 60 + 20),
                distance: Some(5.2),
            }]
        );
    }

    #[test]
    fn parse_hours_and_missing_fields() {
        let input = "2022-01-05  1:02:10  10\n2022-01-07 - 3.0\n2022-01-09 45:00\n2022-01-10\n";
        let records = parse_log(input).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].duration_secs, Some(3600 + 2 * 60 + 10));
        assert_eq!(records[0].distance, Some(10.0));
        assert_eq!(records[1].duration_secs, None);
        assert_eq!(records[1].distance, Some(3.0));
        assert_eq!(records[2].duration_secs, Some(45 * 60));
        assert_eq!(records[2].distance, None);
        assert_eq!(records[3].duration_secs, None);
        assert_eq!(records[3].distance, None);
    }

    #[test]
    fn skip_comments_blank_lines_and_notes() {
        let input = "# header\n\n   \n2022-02-01 20:00 4 easy with Sam\n";
        let records = parse_log(input).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].distance, Some(4.0));
    }

    #[test]
    fn long_runs_without_hours_are_minutes() {
        assert_eq!(parse_duration.parse("95:30").unwrap(), 95 * 60 + 30);
    }

    #[test]
    fn reject_bad_seconds() {
        assert!(parse_duration.parse("31:75").is_err());
        assert!(parse_duration.parse("1:75:00").is_err());
    }

    #[test]
    fn reject_durations_past_u32_seconds() {
        assert!(parse_duration.parse("99999999:00").is_err());
        assert!(parse_duration.parse("2000000:00:00").is_err());
        assert_eq!(parse_duration.parse("1193046:28:15").unwrap(), u32::MAX);

        match parse_log("2022-01-01 20:00 4\n2022-01-03 2000000:00:00 5\n") {
            Err(ChartError::Parse { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("invalid duration"), "got: {message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn report_line_numbers() {
        let input = "2022-01-03 31:20 5.2\n# note\n2022-13-01 31:20 5.2\n";
        match parse_log(input) {
            Err(ChartError::Parse { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("2022-13-01"), "got: {message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn reject_bad_distance() {
        let err = parse_log("2022-01-03 31:20 5km").unwrap_err();
        assert!(err.to_string().contains("invalid distance `5km`"));
    }

    #[test]
    fn aggregate_merges_same_day() {
        let records = parse_log("2022-03-01 20:00 4\n2022-03-01 10:00 -\n2022-02-28 - 2.5\n").unwrap();
        let days = aggregate_by_date(&records);
        assert_eq!(days.len(), 2);
        let first = days.values().next().unwrap();
        assert_eq!(first.date, date(2022, 2, 28));
        let merged = days[&date(2022, 3, 1)];
        assert_eq!(merged.duration_secs, Some(30 * 60));
        assert_eq!(merged.distance, Some(4.0));
    }

    #[test]
    fn merging_huge_durations_saturates() {
        let records = parse_log("2022-03-01 1000000:00:00 4\n2022-03-01 1000000:00:00 4\n").unwrap();
        let merged = aggregate_by_date(&records)[&date(2022, 3, 1)];
        assert_eq!(merged.duration_secs, Some(u32::MAX));
        assert_eq!(merged.distance, Some(8.0));
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let err = load_log(Path::new("/definitely/not/here.log")).unwrap_err();
        assert!(matches!(err, ChartError::FileRead { .. }));
    }
}
