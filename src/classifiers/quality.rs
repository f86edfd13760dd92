//! The hourly surf-quality verdict.
//!
//! Four disqualifiers run first; any one of them forces the bottom tier
//! with a reason. Hours that clear them all are rated off a period-tiered
//! table crossed with wind type and speed.

use crate::aligner::ForecastSample;
use crate::spots::SurfSpot;

use super::types::{ClassifiedSample, Rating, WindType};
use super::wind::wind_quality;

/// Swell peak period below which the energy is wind chop, not surf.
pub const MIN_PEAK_PERIOD_S: f64 = 7.0;

/// Rates one aligned hour for one spot.
///
/// Pure and total: the same profile and sample always produce the same
/// verdict. A profile with no facing bearing degrades the wind outputs to
/// unknown and the hour falls through the table on those values.
pub fn evaluate_surf_quality(spot: &SurfSpot, sample: &ForecastSample) -> ClassifiedSample {
    let (wind_type, wind_severity) = wind_quality(
        spot.facing_direction_deg.map(f64::from),
        Some(sample.wind_direction_deg),
        Some(sample.wind_speed_kmh),
    );

    let mut reasons: Vec<String> = Vec::new();

    if sample.swell_height_m < spot.swell_min_m {
        reasons.push(format!(
            "swell too small ({:.2}m < {}m)",
            sample.swell_height_m, spot.swell_min_m
        ));
    }
    if !spot.swell_dir_ok(sample.swell_direction_deg) {
        reasons.push(format!(
            "swell direction out of window ({:.0}°)",
            sample.swell_direction_deg
        ));
    }
    if sample.wind_wave_height_m > spot.preferred_wind_wave_max_m {
        reasons.push(format!(
            "too choppy ({:.2}m wind waves)",
            sample.wind_wave_height_m
        ));
    }
    if sample.peak_period_s < MIN_PEAK_PERIOD_S {
        reasons.push(format!("swell too weak ({}s period)", sample.peak_period_s));
    }

    let wind_tag = format!("wind {wind_type} ({wind_severity})");

    let (rating, explanation) = if reasons.is_empty() {
        let (rating, why) =
            rate_clean_conditions(sample.peak_period_s, wind_type, sample.wind_speed_kmh);
        (rating, format!("{why}; {wind_tag}"))
    } else {
        (
            Rating::LakeMode,
            format!("{}; {wind_tag}", reasons.join("; ")),
        )
    };

    ClassifiedSample {
        sample: sample.clone(),
        wind_type,
        wind_severity,
        rating,
        explanation,
    }
}

/// The rating table for hours that cleared every disqualifier.
///
/// Three period bands, each crossed with wind type and raw speed. Longer
/// period tolerates more wind; unknown wind falls to the worst arm of its
/// band.
fn rate_clean_conditions(period_s: f64, wind: WindType, speed_kmh: f64) -> (Rating, String) {
    use Rating::*;
    use WindType::*;

    let clean = matches!(wind, Offshore | Glassy);

    if period_s >= 12.0 {
        if clean && speed_kmh <= 12.0 {
            (
                Firing,
                format!("{period_s}s groundswell with {wind} wind at {speed_kmh} km/h"),
            )
        } else if wind == Offshore && speed_kmh <= 20.0 {
            (
                Solid,
                format!("{period_s}s groundswell holds under {speed_kmh} km/h offshore wind"),
            )
        } else if matches!(wind, Onshore | CrossShore) && speed_kmh < 8.0 {
            (
                Solid,
                format!("{period_s}s groundswell with light {wind} wind ({speed_kmh} km/h)"),
            )
        } else if (wind == Onshore && speed_kmh < 12.0)
            || (wind == CrossShore && speed_kmh < 15.0)
        {
            (
                Playable,
                format!("{period_s}s groundswell compromised by {speed_kmh} km/h {wind} wind"),
            )
        } else {
            (
                Sketchy,
                format!("{period_s}s groundswell blown out by {speed_kmh} km/h {wind} wind"),
            )
        }
    } else if period_s >= 10.0 {
        if clean && speed_kmh <= 15.0 {
            (
                Solid,
                format!("{period_s}s swell, clean {wind} conditions at {speed_kmh} km/h"),
            )
        } else if matches!(wind, Onshore | CrossShore) && speed_kmh < 8.0 {
            (
                Playable,
                format!("{period_s}s swell with manageable {wind} wind ({speed_kmh} km/h)"),
            )
        } else if wind == CrossShore && speed_kmh < 12.0 {
            (
                Playable,
                format!("{period_s}s swell, workable {speed_kmh} km/h cross-shore wind"),
            )
        } else {
            (
                Sketchy,
                format!("{period_s}s mid-period swell against {speed_kmh} km/h {wind} wind"),
            )
        }
    } else {
        // 7s up to 10s
        if clean && speed_kmh <= 12.0 {
            (
                Playable,
                format!("short {period_s}s swell but {wind} wind at {speed_kmh} km/h"),
            )
        } else if matches!(wind, Onshore | CrossShore) && speed_kmh < 6.0 {
            (
                Playable,
                format!("short {period_s}s swell, near-calm {wind} wind ({speed_kmh} km/h)"),
            )
        } else if wind == CrossShore && speed_kmh < 10.0 {
            (
                Sketchy,
                format!("short {period_s}s swell with {speed_kmh} km/h cross-shore wind"),
            )
        } else {
            (
                LakeMode,
                format!("short {period_s}s swell and {speed_kmh} km/h {wind} wind"),
            )
        }
    }
}
