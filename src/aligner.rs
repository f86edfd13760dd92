//! Hourly series alignment.
//!
//! The marine and weather providers hand back independent hourly blocks.
//! [`align`] joins them on their timestamps and emits one
//! [`ForecastSample`] per hour for which every required field resolved.
//! Hours with a null value are dropped and tallied, never fatal; a column
//! missing outright from a payload aborts the whole call.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Timestamp format used on the providers' hourly time axes (local-naive).
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Ratio between spectral average period and peak period, used to estimate
/// the peak value when the provider omits it. Domain heuristic with no
/// documented derivation; override via [`AlignerConfig`] rather than edit.
pub const DEFAULT_PEAK_PERIOD_RATIO: f64 = 0.8;

/// Column names and origin tags shared with the retrieval layer.
pub mod fields {
    pub const ORIGIN_MARINE: &str = "marine";
    pub const ORIGIN_WEATHER: &str = "weather";

    pub const SWELL_HEIGHT: &str = "swell_wave_height";
    pub const SWELL_DIRECTION: &str = "swell_wave_direction";
    pub const SWELL_PEAK_PERIOD: &str = "swell_wave_peak_period";
    pub const SWELL_AVG_PERIOD: &str = "swell_wave_period";
    pub const WIND_WAVE_HEIGHT: &str = "wind_wave_height";

    pub const WIND_SPEED: &str = "wind_speed_10m";
    pub const WIND_DIRECTION: &str = "wind_direction_10m";
}

/// One provider's hourly block: an ordered time axis plus parallel nullable
/// columns keyed by field name.
#[derive(Debug, Clone)]
pub struct RawHourlySeries {
    pub origin: &'static str,
    pub time: Vec<String>,
    pub fields: HashMap<String, Vec<Option<f64>>>,
}

impl RawHourlySeries {
    pub fn new(
        origin: &'static str,
        time: Vec<String>,
        fields: HashMap<String, Vec<Option<f64>>>,
    ) -> Self {
        Self {
            origin,
            time,
            fields,
        }
    }

    fn column(&self, name: &str) -> Result<&[Option<f64>], AlignError> {
        self.fields
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AlignError::MissingField {
                origin: self.origin,
                field: name.to_string(),
            })
    }
}

/// Failures that abort an alignment call outright.
///
/// Per-hour nulls are not errors: they drop the hour and are tallied in
/// [`GapCounts`].
#[derive(Debug, Error)]
pub enum AlignError {
    /// A required column is entirely absent from a provider payload. The
    /// provider contract itself is broken, not a single data point.
    #[error("{origin} payload is missing required field `{field}`")]
    MissingField {
        origin: &'static str,
        field: String,
    },

    /// Both origins returned hours but their time axes never intersect.
    #[error("no common timestamp between {marine} marine and {weather} weather hours")]
    CadenceMismatch { marine: usize, weather: usize },

    /// A time-axis entry did not parse in the provider time format.
    #[error("unparseable timestamp `{value}` in {origin} series")]
    BadTimestamp {
        origin: &'static str,
        value: String,
    },
}

/// One hour of aligned forecast data.
///
/// Only constructed when every required field resolved. The peak period may
/// be estimated from the spectral average; `peak_period_estimated` records
/// which it was.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSample {
    pub time: NaiveDateTime,
    pub swell_height_m: f64,
    pub swell_direction_deg: f64,
    pub peak_period_s: f64,
    pub peak_period_estimated: bool,
    pub wind_wave_height_m: f64,
    pub wind_speed_kmh: f64,
    pub wind_direction_deg: f64,
}

/// Per-field tally of hours dropped because a required value was null.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GapCounts {
    pub swell_height: usize,
    pub swell_direction: usize,
    pub peak_period: usize,
    pub wind_wave_height: usize,
    pub wind_speed: usize,
    pub wind_direction: usize,
}

impl GapCounts {
    /// Number of hours dropped for at least one field. An hour missing
    /// several fields is counted once per field here, so this is an upper
    /// bound on dropped hours.
    pub fn total(&self) -> usize {
        self.swell_height
            + self.swell_direction
            + self.peak_period
            + self.wind_wave_height
            + self.wind_speed
            + self.wind_direction
    }
}

/// Result of aligning the two provider series: samples ordered by time,
/// plus the gap tally for diagnostics.
#[derive(Debug)]
pub struct Alignment {
    pub samples: Vec<ForecastSample>,
    pub gaps: GapCounts,
}

/// Tunables for [`align`].
#[derive(Debug, Clone)]
pub struct AlignerConfig {
    /// Average-to-peak period conversion ratio.
    pub peak_period_ratio: f64,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            peak_period_ratio: DEFAULT_PEAK_PERIOD_RATIO,
        }
    }
}

/// Joins the marine and weather series on their timestamps and builds one
/// sample per hour present in both with all required fields non-null.
///
/// # Errors
///
/// [`AlignError::MissingField`] if a required column is absent,
/// [`AlignError::BadTimestamp`] if a time axis entry does not parse, and
/// [`AlignError::CadenceMismatch`] if both series carry hours but share
/// none.
pub fn align(
    marine: &RawHourlySeries,
    weather: &RawHourlySeries,
    config: &AlignerConfig,
) -> Result<Alignment, AlignError> {
    // Schema check up front so a broken payload fails before any hour is
    // processed.
    let swell_height = marine.column(fields::SWELL_HEIGHT)?;
    let swell_direction = marine.column(fields::SWELL_DIRECTION)?;
    let peak_period = marine.column(fields::SWELL_PEAK_PERIOD)?;
    let avg_period = marine.column(fields::SWELL_AVG_PERIOD)?;
    let wind_wave_height = marine.column(fields::WIND_WAVE_HEIGHT)?;
    let wind_speed = weather.column(fields::WIND_SPEED)?;
    let wind_direction = weather.column(fields::WIND_DIRECTION)?;

    let weather_index = index_by_time(weather)?;

    let mut samples = Vec::new();
    let mut gaps = GapCounts::default();
    let mut joined = 0usize;
    let mut last_emitted: Option<NaiveDateTime> = None;

    for (i, raw) in marine.time.iter().enumerate() {
        let t = parse_time(marine.origin, raw)?;
        let Some(&j) = weather_index.get(&t) else {
            continue;
        };
        joined += 1;

        // Duplicate-hour guard: the first occurrence wins.
        if last_emitted == Some(t) {
            continue;
        }

        let value = |col: &[Option<f64>], idx: usize| col.get(idx).copied().flatten();

        let height = value(swell_height, i);
        let direction = value(swell_direction, i);
        let chop = value(wind_wave_height, i);
        let speed = value(wind_speed, j);
        let wind_dir = value(wind_direction, j);

        let (period, estimated) = match value(peak_period, i) {
            Some(p) => (Some(p), false),
            None => match value(avg_period, i) {
                Some(avg) => (Some(round1(avg / config.peak_period_ratio)), true),
                None => (None, false),
            },
        };

        if height.is_none() {
            gaps.swell_height += 1;
        }
        if direction.is_none() {
            gaps.swell_direction += 1;
        }
        if period.is_none() {
            gaps.peak_period += 1;
        }
        if chop.is_none() {
            gaps.wind_wave_height += 1;
        }
        if speed.is_none() {
            gaps.wind_speed += 1;
        }
        if wind_dir.is_none() {
            gaps.wind_direction += 1;
        }

        let (Some(height), Some(direction), Some(period), Some(chop), Some(speed), Some(wind_dir)) =
            (height, direction, period, chop, speed, wind_dir)
        else {
            debug!(hour = %raw, "dropping hour with unresolved fields");
            continue;
        };

        samples.push(ForecastSample {
            time: t,
            swell_height_m: height,
            swell_direction_deg: direction,
            peak_period_s: period,
            peak_period_estimated: estimated,
            wind_wave_height_m: chop,
            wind_speed_kmh: speed,
            wind_direction_deg: wind_dir,
        });
        last_emitted = Some(t);
    }

    if joined == 0 && !marine.time.is_empty() && !weather.time.is_empty() {
        return Err(AlignError::CadenceMismatch {
            marine: marine.time.len(),
            weather: weather.time.len(),
        });
    }

    Ok(Alignment { samples, gaps })
}

fn index_by_time(series: &RawHourlySeries) -> Result<HashMap<NaiveDateTime, usize>, AlignError> {
    let mut index = HashMap::with_capacity(series.time.len());
    for (i, raw) in series.time.iter().enumerate() {
        let t = parse_time(series.origin, raw)?;
        // First occurrence wins on duplicate timestamps.
        index.entry(t).or_insert(i);
    }
    Ok(index)
}

fn parse_time(origin: &'static str, raw: &str) -> Result<NaiveDateTime, AlignError> {
    NaiveDateTime::parse_from_str(raw, TIME_FORMAT).map_err(|_| AlignError::BadTimestamp {
        origin,
        value: raw.to_string(),
    })
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
