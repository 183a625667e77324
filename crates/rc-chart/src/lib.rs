//! Running calendar chart.
//!
//! Reads a daily running log, lays out one calendar year as a grid of
//! weeks, and draws one marker per logged day. Marker area follows the
//! distance and marker colour follows the pace.

pub mod calendar;
pub mod chart;
pub mod config;
pub mod error;
pub mod pace;
pub mod records;
pub mod stats;

pub use calendar::{DAYS_PER_WEEK, DayCell, MONTHS_PER_YEAR, MonthGroup, month_groups, row_count};
pub use chart::{NO_PACE_CLASS, SECTIONS, draw_calendar, month_class, summary_lines};
pub use config::ChartConfig;
pub use error::{ChartError, Result};
pub use pace::{ColorRamp, RampStop, Rgb, format_pace, pace_seconds_per_km};
pub use records::{DayRecord, aggregate_by_date, load_log, parse_log};
pub use stats::{Summary, summarize};
