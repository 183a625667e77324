//! Pace colours.
//!
//! A [`ColorRamp`] maps a pace (seconds per kilometre) to a colour by
//! interpolating linearly between breakpoints ordered slowest → fastest.
//! Paces slower than the first breakpoint take its colour; paces faster
//! than the last breakpoint have no colour.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

// ─── Colors ──────────────────────────────────────────────────────────────

/// 8-bit RGB colour. Serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB`. The `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 => Some(Self::new(
                hex_val(bytes[0])? * 17,
                hex_val(bytes[1])? * 17,
                hex_val(bytes[2])? * 17,
            )),
            6 => Some(Self::new(
                hex_val(bytes[0])? << 4 | hex_val(bytes[1])?,
                hex_val(bytes[2])? << 4 | hex_val(bytes[3])?,
                hex_val(bytes[4])? << 4 | hex_val(bytes[5])?,
            )),
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Blend towards `other`; `t` is clamped to `0.0..=1.0`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| {
            let (a, b) = (f64::from(a), f64::from(b));
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Self::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }
}

/// CSS functional notation, e.g. `rgb(49, 130, 189)`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid hex colour `{value}`"))
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

// ─── Ramp ────────────────────────────────────────────────────────────────

/// A breakpoint: at `pace` seconds per km the colour is exactly `color`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampStop {
    pub pace: f64,
    pub color: Rgb,
}

/// Breakpoints ordered slowest (largest pace) → fastest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorRamp {
    stops: Vec<RampStop>,
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self {
            stops: vec![
                RampStop { pace: 420.0, color: Rgb::new(49, 130, 189) },
                RampStop { pace: 360.0, color: Rgb::new(49, 163, 84) },
                RampStop { pace: 300.0, color: Rgb::new(254, 196, 79) },
                RampStop { pace: 270.0, color: Rgb::new(240, 59, 32) },
                RampStop { pace: 240.0, color: Rgb::new(189, 0, 38) },
            ],
        }
    }
}

impl ColorRamp {
    /// # Errors
    /// Returns [`ChartError::Config`] unless `stops` is non-empty with
    /// strictly decreasing, finite paces.
    pub fn new(stops: Vec<RampStop>) -> Result<Self> {
        let ramp = Self { stops };
        ramp.validate()?;
        Ok(ramp)
    }

    pub fn stops(&self) -> &[RampStop] {
        &self.stops
    }

    /// # Errors
    /// See [`ColorRamp::new`].
    pub fn validate(&self) -> Result<()> {
        if self.stops.is_empty() {
            return Err(ChartError::Config("colour ramp needs at least one stop".into()));
        }
        if let Some(stop) = self.stops.iter().find(|s| !s.pace.is_finite()) {
            return Err(ChartError::Config(format!("ramp pace {} is not finite", stop.pace)));
        }
        if let Some(pair) = self.stops.windows(2).find(|pair| pair[0].pace <= pair[1].pace) {
            return Err(ChartError::Config(format!(
                "ramp paces must decrease: {} then {}",
                pair[0].pace, pair[1].pace
            )));
        }
        Ok(())
    }

    /// Colour for `pace` seconds per km, or `None` when `pace` is faster
    /// than the fastest breakpoint.
    pub fn color_for(&self, pace: f64) -> Option<Rgb> {
        let slowest = self.stops.first()?;
        if pace >= slowest.pace {
            return Some(slowest.color);
        }
        self.stops.windows(2).find_map(|pair| {
            let (slow, fast) = (&pair[0], &pair[1]);
            (pace >= fast.pace).then(|| {
                let t = (slow.pace - pace) / (slow.pace - fast.pace);
                slow.color.lerp(fast.color, t)
            })
        })
    }
}

// ─── Pace helpers ────────────────────────────────────────────────────────

/// Seconds per kilometre, if both values are known and the distance is positive.
pub fn pace_seconds_per_km(duration_secs: Option<u32>, distance_km: Option<f64>) -> Option<f64> {
    let duration = f64::from(duration_secs?);
    let distance = distance_km.filter(|d| *d > 0.0)?;
    Some(duration / distance)
}

/// `m:ss`, rounded to the nearest second.
pub fn format_pace(seconds_per_km: f64) -> String {
    let total = seconds_per_km.round().max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
