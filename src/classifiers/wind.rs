//! Wind incidence and severity relative to a break's facing bearing.

use super::types::{WindSeverity, WindType};

/// Below this speed the surface is glassy and direction is irrelevant.
pub const GLASSY_MAX_KMH: f64 = 3.0;
/// Upper bound (inclusive) of the light band.
pub const LIGHT_MAX_KMH: f64 = 10.0;
/// Upper bound (inclusive) of the breezy band; above is strong.
pub const BREEZY_MAX_KMH: f64 = 18.0;

/// Classifies wind against the direction a break faces.
///
/// Bearings are reduced mod 360, so adding a full turn to the wind bearing
/// changes nothing. Any missing input degrades both outputs to unknown
/// rather than failing.
pub fn wind_quality(
    facing_deg: Option<f64>,
    wind_from_deg: Option<f64>,
    wind_speed_kmh: Option<f64>,
) -> (WindType, WindSeverity) {
    let (Some(facing), Some(wind_from), Some(speed)) = (facing_deg, wind_from_deg, wind_speed_kmh)
    else {
        return (WindType::Unknown, WindSeverity::Unknown);
    };

    if speed < GLASSY_MAX_KMH {
        return (WindType::Glassy, WindSeverity::None);
    }

    let severity = if speed <= LIGHT_MAX_KMH {
        WindSeverity::Light
    } else if speed <= BREEZY_MAX_KMH {
        WindSeverity::Breezy
    } else {
        WindSeverity::Strong
    };

    // Angle between where the break faces and where the wind comes from.
    let delta = (wind_from - facing).rem_euclid(360.0);
    let wind_type = if (120.0..=240.0).contains(&delta) {
        WindType::Offshore
    } else if (60.0..120.0).contains(&delta) || (delta > 240.0 && delta <= 300.0) {
        WindType::CrossShore
    } else {
        WindType::Onshore
    };

    (wind_type, severity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wind_directly_opposite_is_offshore() {
        let (wind_type, severity) = wind_quality(Some(270.0), Some(90.0), Some(10.0));
        assert_eq!(wind_type, WindType::Offshore);
        assert_eq!(severity, WindSeverity::Light);
    }

    #[test]
    fn test_wind_from_facing_direction_is_onshore() {
        let (wind_type, _) = wind_quality(Some(270.0), Some(270.0), Some(10.0));
        assert_eq!(wind_type, WindType::Onshore);
    }

    #[test]
    fn test_cross_shore_sectors() {
        let (left, _) = wind_quality(Some(0.0), Some(90.0), Some(10.0));
        let (right, _) = wind_quality(Some(0.0), Some(280.0), Some(10.0));
        assert_eq!(left, WindType::CrossShore);
        assert_eq!(right, WindType::CrossShore);
    }

    #[test]
    fn test_sector_boundaries() {
        // delta 120 and 240 are offshore (inclusive); 60 and 300 cross-shore.
        assert_eq!(
            wind_quality(Some(0.0), Some(120.0), Some(10.0)).0,
            WindType::Offshore
        );
        assert_eq!(
            wind_quality(Some(0.0), Some(240.0), Some(10.0)).0,
            WindType::Offshore
        );
        assert_eq!(
            wind_quality(Some(0.0), Some(60.0), Some(10.0)).0,
            WindType::CrossShore
        );
        assert_eq!(
            wind_quality(Some(0.0), Some(300.0), Some(10.0)).0,
            WindType::CrossShore
        );
        assert_eq!(
            wind_quality(Some(0.0), Some(59.9), Some(10.0)).0,
            WindType::Onshore
        );
        assert_eq!(
            wind_quality(Some(0.0), Some(300.1), Some(10.0)).0,
            WindType::Onshore
        );
    }

    #[test]
    fn test_periodic_in_wind_bearing() {
        for facing in [0.0, 45.0, 180.0, 315.0] {
            for wind in [0.0, 30.0, 135.0, 270.0] {
                assert_eq!(
                    wind_quality(Some(facing), Some(wind), Some(12.0)),
                    wind_quality(Some(facing), Some(wind + 360.0), Some(12.0)),
                );
            }
        }
    }

    #[test]
    fn test_glassy_ignores_direction() {
        let (a, sa) = wind_quality(Some(270.0), Some(270.0), Some(2.9));
        let (b, sb) = wind_quality(Some(270.0), Some(90.0), Some(0.0));
        assert_eq!((a, sa), (WindType::Glassy, WindSeverity::None));
        assert_eq!((b, sb), (WindType::Glassy, WindSeverity::None));
    }

    #[test]
    fn test_severity_band_edges_advance_in_order() {
        let severity_at =
            |speed: f64| wind_quality(Some(270.0), Some(90.0), Some(speed)).1;

        assert_eq!(severity_at(2.9), WindSeverity::None);
        assert_eq!(severity_at(3.1), WindSeverity::Light);
        assert_eq!(severity_at(9.9), WindSeverity::Light);
        assert_eq!(severity_at(10.1), WindSeverity::Breezy);
        assert_eq!(severity_at(17.9), WindSeverity::Breezy);
        assert_eq!(severity_at(18.1), WindSeverity::Strong);

        // Each crossing advances exactly one band.
        let bands = [2.9, 3.1, 10.1, 18.1].map(severity_at);
        for pair in bands.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_band_bounds_are_inclusive_upper() {
        let severity_at =
            |speed: f64| wind_quality(Some(270.0), Some(90.0), Some(speed)).1;
        assert_eq!(severity_at(3.0), WindSeverity::Light);
        assert_eq!(severity_at(10.0), WindSeverity::Light);
        assert_eq!(severity_at(18.0), WindSeverity::Breezy);
    }

    #[test]
    fn test_missing_inputs_degrade_to_unknown() {
        assert_eq!(
            wind_quality(None, Some(90.0), Some(10.0)),
            (WindType::Unknown, WindSeverity::Unknown)
        );
        assert_eq!(
            wind_quality(Some(270.0), None, Some(10.0)),
            (WindType::Unknown, WindSeverity::Unknown)
        );
        assert_eq!(
            wind_quality(Some(270.0), Some(90.0), None),
            (WindType::Unknown, WindSeverity::Unknown)
        );
    }
}
