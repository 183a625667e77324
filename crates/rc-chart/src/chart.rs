//! Calendar chart drawing.
//!
//! Layout, in cell units (`s = cell_size`):
//!
//! ```text
//!  ┌──────┬──────────────────┬───┐
//!  │      │ M T W T F S S    │   │  2s  weekday header
//!  │Month │ day grid (7 × N) │   │  N·s
//!  │ 3s   ├──────────────────┤ s │
//!  │      │ legend, summary  │   │  6s
//!  └──────┴──────────────────┴───┘
//! ```
//!
//! The document is split into sections registered up front (`days`,
//! `markers`, `labels`, `legend`, `summary`) and filled as data becomes
//! available.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use kurbo::{Point, Rect};
use rc_core::{Attrs, Container, Document, Section, format_num};

use crate::calendar::{DAYS_PER_WEEK, DayCell, MonthGroup, month_groups, row_count};
use crate::config::ChartConfig;
use crate::error::Result;
use crate::pace::{format_pace, pace_seconds_per_km};
use crate::records::{DayRecord, aggregate_by_date};
use crate::stats::{Summary, summarize};

pub const DAYS_SECTION: &str = "days";
pub const MARKERS_SECTION: &str = "markers";
pub const LABELS_SECTION: &str = "labels";
pub const LEGEND_SECTION: &str = "legend";
pub const SUMMARY_SECTION: &str = "summary";

/// Sections in output order.
pub const SECTIONS: [&str; 5] = [
    DAYS_SECTION,
    MARKERS_SECTION,
    LABELS_SECTION,
    LEGEND_SECTION,
    SUMMARY_SECTION,
];

/// Class for markers drawn without a pace colour.
pub const NO_PACE_CLASS: &str = "no-pace";

const WEEKDAY_INITIALS: [&str; DAYS_PER_WEEK as usize] = ["M", "T", "W", "T", "F", "S", "S"];

/// Largest marker radius as a fraction of the cell size.
const MAX_MARKER_RATIO: f64 = 0.45;

// ─── Layout ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Layout {
    cell: f64,
    /// Top-left corner of the day grid.
    origin: Point,
    rows: u32,
}

impl Layout {
    fn new(cell: f64, rows: u32) -> Self {
        Self {
            cell,
            origin: Point::new(3.0 * cell, 2.0 * cell),
            rows,
        }
    }

    fn grid_width(&self) -> f64 {
        f64::from(DAYS_PER_WEEK) * self.cell
    }

    fn grid_bottom(&self) -> f64 {
        self.origin.y + f64::from(self.rows) * self.cell
    }

    fn width(&self) -> f64 {
        self.origin.x + self.grid_width() + self.cell
    }

    fn height(&self) -> f64 {
        self.grid_bottom() + 6.0 * self.cell
    }

    /// Visible square of a day; one unit smaller than the cell to leave a gap.
    fn day_rect(&self, day: &DayCell) -> Rect {
        let x = self.origin.x + f64::from(day.column) * self.cell;
        let y = self.origin.y + f64::from(day.row) * self.cell;
        Rect::from_origin_size((x, y), (self.cell - 1.0, self.cell - 1.0))
    }

    fn column_center(&self, column: u32) -> f64 {
        self.origin.x + (f64::from(column) + 0.5) * self.cell
    }

    fn row_center(&self, row: u32) -> f64 {
        self.origin.y + (f64::from(row) + 0.5) * self.cell
    }
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Draw one calendar year of `records` as an SVG document.
///
/// Records outside `year` are ignored; records sharing a date are merged.
///
/// # Errors
/// Returns a configuration error for an invalid `config` and
/// [`ChartError::InvalidYear`](crate::ChartError::InvalidYear) for a year
/// outside the supported range.
pub fn draw_calendar(year: i32, records: &[DayRecord], config: &ChartConfig) -> Result<Document> {
    config.validate()?;
    let months = month_groups(year, &config.month_names)?;

    let mut days = aggregate_by_date(records);
    let before = days.len();
    days.retain(|date, _| date.year() == year);
    if days.len() < before {
        log::debug!("skipped {} logged days outside {year}", before - days.len());
    }

    let layout = Layout::new(config.cell_size, row_count(&months));
    let mut doc = Document::with_attrs(Attrs::new().with(
        "viewBox",
        format!("0 0 {} {}", format_num(layout.width()), format_num(layout.height())),
    ));
    for name in SECTIONS {
        doc.add_section(name);
    }

    add_styles(&mut doc, config);

    let max_distance = days
        .values()
        .filter_map(|day| day.distance)
        .fold(0.0_f64, f64::max);

    for month in &months {
        for day in &month.days {
            let bounds = layout.day_rect(day);
            doc.get_section(DAYS_SECTION)?.rect(
                bounds.x0,
                bounds.y0,
                bounds.width(),
                bounds.height(),
                Attrs::new().class(month_class(month.month)),
            );
            if let Some(record) = days.get(&day.date) {
                draw_marker(doc.get_section(MARKERS_SECTION)?, record, bounds, max_distance, config);
            }
        }
    }

    draw_labels(doc.get_section(LABELS_SECTION)?, &months, &layout);
    draw_legend(doc.get_section(LEGEND_SECTION)?, &layout, config);
    draw_summary(doc.get_section(SUMMARY_SECTION)?, &days, &layout);

    log::info!(
        "drew {year}: {} days, {} with records",
        months.iter().map(|m| m.days.len()).sum::<usize>(),
        days.len()
    );
    Ok(doc)
}

/// CSS class of a month's day cells, e.g. `m1` for January.
pub fn month_class(month: u32) -> String {
    format!("m{month}")
}

// ─── Styles ──────────────────────────────────────────────────────────────

fn add_styles(doc: &mut Document, config: &ChartConfig) {
    let font_size = format!("{}px", format_num(config.cell_size * 0.45));

    doc.add_style("rect", [("stroke", "none")]);
    for (month, color) in (1..).zip(&config.month_colors) {
        doc.add_style(&format!(".{}", month_class(month)), [("fill", color.as_str())]);
    }
    doc.add_style(
        "circle",
        [
            ("fill-opacity", format_num(config.marker_opacity)),
            ("stroke", "#444444".to_owned()),
            ("stroke-width", "0.5".to_owned()),
        ],
    );
    doc.add_style(&format!(".{NO_PACE_CLASS}"), [("fill", config.no_pace_color.as_str())]);
    doc.add_style(
        "text",
        [
            ("font-family", config.font_family.as_str()),
            ("font-size", font_size.as_str()),
            ("fill", "#333333"),
        ],
    );
    doc.add_style(".month-label", [("text-anchor", "end"), ("dominant-baseline", "middle")]);
    doc.add_style(".weekday, .legend-label", [("text-anchor", "middle")]);
}

// ─── Markers ─────────────────────────────────────────────────────────────

fn draw_marker(
    markers: &mut Section,
    record: &DayRecord,
    bounds: Rect,
    max_distance: f64,
    config: &ChartConfig,
) {
    let Some(distance) = record.distance.filter(|d| *d > 0.0) else {
        return;
    };
    if max_distance <= 0.0 {
        return;
    }

    let radius = MAX_MARKER_RATIO * config.cell_size * (distance / max_distance).sqrt();
    let pace = pace_seconds_per_km(record.duration_secs, record.distance);
    let attrs = match pace.and_then(|p| config.ramp.color_for(p)) {
        Some(color) => Attrs::new().with("fill", color.to_string()),
        None => Attrs::new().class(NO_PACE_CLASS),
    };

    let center = bounds.center();
    markers
        .circle(center.x, center.y, radius, attrs)
        .add_text("title", Attrs::new(), marker_title(record.date, distance, pace));
}

fn marker_title(date: NaiveDate, distance: f64, pace: Option<f64>) -> String {
    match pace {
        Some(pace) => format!("{date}: {distance:.1} km at {} /km", format_pace(pace)),
        None => format!("{date}: {distance:.1} km"),
    }
}

// ─── Labels ──────────────────────────────────────────────────────────────

fn draw_labels(labels: &mut Section, months: &[MonthGroup], layout: &Layout) {
    let header_y = layout.origin.y - 0.5 * layout.cell;
    for (column, initial) in (0..).zip(WEEKDAY_INITIALS) {
        labels.add_text(
            "text",
            Attrs::new()
                .with("x", layout.column_center(column))
                .with("y", header_y)
                .class("weekday"),
            initial,
        );
    }

    let label_x = layout.origin.x - 0.5 * layout.cell;
    for month in months {
        let Some(first) = month.first_day() else {
            continue;
        };
        labels.add_text(
            "text",
            Attrs::new()
                .with("x", label_x)
                .with("y", layout.row_center(first.row))
                .class("month-label"),
            &month.name,
        );
    }
}

// ─── Legend ──────────────────────────────────────────────────────────────

fn draw_legend(legend: &mut Section, layout: &Layout, config: &ChartConfig) {
    let stops = config.ramp.stops();
    let keys = stops.len() + 1;
    let step = layout.grid_width() / keys as f64;
    let top = layout.grid_bottom() + 0.5 * layout.cell;
    let radius = 0.35 * layout.cell;
    let circle_y = top + 0.5 * layout.cell;
    let label_y = top + 1.6 * layout.cell;

    let key_x = |index: usize| layout.origin.x + (index as f64 + 0.5) * step;

    for (index, stop) in stops.iter().enumerate() {
        let x = key_x(index);
        legend.circle(x, circle_y, radius, Attrs::new().with("fill", stop.color.to_string()));
        legend.add_text(
            "text",
            Attrs::new().with("x", x).with("y", label_y).class("legend-label"),
            format_pace(stop.pace),
        );
    }

    let x = key_x(stops.len());
    legend.circle(x, circle_y, radius, Attrs::new().class(NO_PACE_CLASS));
    legend.add_text(
        "text",
        Attrs::new().with("x", x).with("y", label_y).class("legend-label"),
        "?",
    );
}

// ─── Summary ─────────────────────────────────────────────────────────────

fn draw_summary(summary: &mut Section, days: &BTreeMap<NaiveDate, DayRecord>, layout: &Layout) {
    let x = layout.origin.x;
    let top = layout.grid_bottom() + 3.0 * layout.cell;
    let line_height = 0.8 * layout.cell;

    for (row, line) in (0_u32..).zip(summary_lines(days)) {
        summary.add_text(
            "text",
            Attrs::new()
                .with("x", x)
                .with("y", top + f64::from(row) * line_height)
                .class("summary"),
            line,
        );
    }
}

/// Human-readable totals, one line each.
pub fn summary_lines(days: &BTreeMap<NaiveDate, DayRecord>) -> Vec<String> {
    let distances = summarize(days.values().map(|day| day.distance));
    let paces = summarize(
        days.values()
            .map(|day| pace_seconds_per_km(day.duration_secs, day.distance)),
    );

    let Some(distances) = distances else {
        return vec![format!("Logged days: {}, no distances", days.len())];
    };

    let mut lines = vec![
        format!(
            "{} runs, {} km in total",
            distances.count,
            format_km(distances.total)
        ),
        format!("Distance (km): {}", range_text(&distances, format_km)),
    ];
    if let Some(paces) = paces {
        lines.push(format!("Pace (/km): {}", range_text(&paces, format_pace)));
    }
    lines
}

fn format_km(km: f64) -> String {
    format!("{km:.1}")
}

fn range_text(summary: &Summary, format: fn(f64) -> String) -> String {
    format!(
        "min {}, median {}, max {}",
        format(summary.min),
        format(summary.median),
        format(summary.max)
    )
}
