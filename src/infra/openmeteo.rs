//! Open-Meteo forecast retrieval.
//!
//! Two endpoints feed one spot: the marine API for swell and wind-wave
//! columns and the weather API for 10 m wind. Both come back as positional
//! hourly blocks that are handed to the aligner as [`RawHourlySeries`].

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use surf_rater::aligner::{RawHourlySeries, fields};
use surf_rater::fetch::{HttpClient, fetch_json};
use surf_rater::spots::SurfSpot;

pub const MARINE_URL: &str = "https://marine-api.open-meteo.com/v1/marine";
pub const WEATHER_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Hourly variables requested from the marine endpoint.
const MARINE_HOURLY: &[&str] = &[
    fields::SWELL_HEIGHT,
    fields::SWELL_DIRECTION,
    fields::SWELL_PEAK_PERIOD,
    fields::SWELL_AVG_PERIOD,
    fields::WIND_WAVE_HEIGHT,
];

/// Hourly variables requested from the weather endpoint.
const WEATHER_HOURLY: &[&str] = &[fields::WIND_SPEED, fields::WIND_DIRECTION];

#[derive(Deserialize)]
struct HourlyResponse {
    hourly: HourlyBlock,
}

/// The provider's `hourly` object: a time axis plus one nullable numeric
/// array per requested variable.
#[derive(Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    #[serde(flatten)]
    fields: HashMap<String, Vec<Option<f64>>>,
}

pub struct OpenMeteoClient<C> {
    http: C,
    marine_url: String,
    weather_url: String,
}

impl<C: HttpClient> OpenMeteoClient<C> {
    pub fn new(http: C) -> Self {
        Self {
            http,
            marine_url: MARINE_URL.to_string(),
            weather_url: WEATHER_URL.to_string(),
        }
    }

    /// Fetches both hourly series for a spot over a `days`-long horizon.
    pub async fn fetch_series(
        &self,
        spot: &SurfSpot,
        days: u8,
    ) -> Result<(RawHourlySeries, RawHourlySeries)> {
        let marine = self
            .fetch_hourly(&self.marine_url, spot, MARINE_HOURLY, days, fields::ORIGIN_MARINE)
            .await?;
        let weather = self
            .fetch_hourly(
                &self.weather_url,
                spot,
                WEATHER_HOURLY,
                days,
                fields::ORIGIN_WEATHER,
            )
            .await?;
        Ok((marine, weather))
    }

    async fn fetch_hourly(
        &self,
        base: &str,
        spot: &SurfSpot,
        variables: &[&str],
        days: u8,
        origin: &'static str,
    ) -> Result<RawHourlySeries> {
        let url = format!(
            "{base}?latitude={lat}&longitude={lon}&timezone={tz}&forecast_days={days}&hourly={vars}",
            lat = spot.lat,
            lon = spot.lon,
            tz = spot.timezone,
            vars = variables.join(","),
        );
        debug!(%url, origin, "requesting hourly series");

        let resp: HourlyResponse = fetch_json(&self.http, &url)
            .await
            .with_context(|| format!("fetching {origin} series for {}", spot.name))?;

        Ok(RawHourlySeries::new(
            origin,
            resp.hourly.time,
            resp.hourly.fields,
        ))
    }
}
