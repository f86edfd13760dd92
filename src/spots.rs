//! Surf spot reference data.
//!
//! A [`SurfSpot`] carries the directional profile the classifier needs:
//! minimum swell height, the acceptable swell arc, the wind-wave ceiling,
//! and the compass direction the break faces.

use serde::{Deserialize, Serialize};

/// A surf break and its directional profile.
///
/// Reference data only: built by a catalog or enrichment job, never mutated
/// by the rating pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfSpot {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// IANA timezone of the break, used for provider requests.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Minimum swell height worth paddling out for, in metres.
    pub swell_min_m: f64,
    /// Inclusive arc of acceptable swell bearings. May wrap through north,
    /// e.g. `(330, 30)` for a north-facing break.
    pub swell_dir_range: (u16, u16),
    /// Wind-wave height above which the face turns to chop, in metres.
    #[serde(default = "default_wind_wave_max")]
    pub preferred_wind_wave_max_m: f64,
    /// Compass direction the break points toward. Enrichment does not always
    /// resolve one; wind classification degrades to unknown without it.
    pub facing_direction_deg: Option<u16>,
}

fn default_timezone() -> String {
    "Europe/London".to_string()
}

fn default_wind_wave_max() -> f64 {
    0.6
}

impl SurfSpot {
    /// Returns `true` if `bearing` lies inside the acceptable swell arc.
    pub fn swell_dir_ok(&self, bearing: f64) -> bool {
        let (lo, hi) = self.swell_dir_range;
        let b = bearing.rem_euclid(360.0);
        if lo <= hi {
            f64::from(lo) <= b && b <= f64::from(hi)
        } else {
            // Arc wraps through north
            b >= f64::from(lo) || b <= f64::from(hi)
        }
    }
}

/// The breaks the system launched with: the Cornwall and North Devon beach
/// catalog, all on UK local time.
pub fn builtin_spots() -> Vec<SurfSpot> {
    fn spot(
        name: &str,
        lat: f64,
        lon: f64,
        swell_min_m: f64,
        swell_dir_range: (u16, u16),
        facing_direction_deg: u16,
    ) -> SurfSpot {
        SurfSpot {
            name: name.to_string(),
            lat,
            lon,
            timezone: default_timezone(),
            swell_min_m,
            swell_dir_range,
            preferred_wind_wave_max_m: default_wind_wave_max(),
            facing_direction_deg: Some(facing_direction_deg),
        }
    }

    vec![
        spot("Fistral Beach", 50.4157, -5.0950, 1.0, (250, 310), 290),
        spot("Perranporth", 50.3454, -5.1542, 1.0, (240, 300), 270),
        spot("Watergate Bay", 50.4372, -5.0541, 1.0, (250, 310), 315),
        spot("Constantine Bay", 50.5382, -5.0262, 1.2, (250, 310), 270),
        spot("Polzeath", 50.5752, -4.9137, 1.2, (270, 330), 180),
        spot("Sennen Cove", 50.0772, -5.7005, 1.0, (250, 320), 315),
        spot("Praa Sands", 50.1004, -5.3875, 1.2, (180, 240), 225),
        spot("Widemouth Bay", 50.7777, -4.5567, 1.0, (250, 310), 270),
        spot("Croyde", 51.1287, -4.2396, 1.2, (240, 290), 270),
        spot("Saunton Sands", 51.0702, -4.2291, 1.0, (240, 290), 270),
    ]
}
