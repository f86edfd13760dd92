//! Joins classified hours to the scraped benchmark stream.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::classifiers::types::{ClassifiedSample, Rating};

use super::scale::BucketScheme;

/// Largest value on the scraped rating scale.
pub const BENCHMARK_MAX: u8 = 10;

/// One entry of the scraped benchmark stream, as the scraping job emits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkEntry {
    /// ISO 8601, with or without an offset; compared on the local clock.
    pub datetime: String,
    pub rating: u8,
}

/// One joined hour of the agreement report. `reason` is set when the
/// classifier ruled the hour out, `justification` when it rated it; never
/// both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub location: String,
    pub datetime: NaiveDateTime,
    pub our_rating: Rating,
    pub our_bucket: String,
    pub benchmark_rating: u8,
    pub matched: bool,
    pub reason: Option<String>,
    pub justification: Option<String>,
}

/// Joins classified samples to benchmark entries on the hour and reports
/// agreement under `scheme`. Hours present on only one side are dropped;
/// malformed benchmark entries are skipped with a warning.
pub fn compare(
    location: &str,
    classified: &[ClassifiedSample],
    benchmark: &[BenchmarkEntry],
    scheme: &BucketScheme,
) -> Vec<ComparisonRecord> {
    let mut by_hour: HashMap<NaiveDateTime, u8> = HashMap::new();
    for entry in benchmark {
        if entry.rating > BENCHMARK_MAX {
            warn!(rating = entry.rating, "benchmark rating out of scale, skipping entry");
            continue;
        }
        match parse_benchmark_time(&entry.datetime) {
            Some(t) => {
                by_hour.entry(truncate_to_hour(t)).or_insert(entry.rating);
            }
            None => {
                warn!(datetime = %entry.datetime, "unparseable benchmark timestamp, skipping entry");
            }
        }
    }

    let mut records = Vec::new();
    for c in classified {
        let hour = truncate_to_hour(c.sample.time);
        let Some(&benchmark_rating) = by_hour.get(&hour) else {
            continue;
        };
        let Some((_, bucket)) = scheme.bucket_for(c.rating) else {
            warn!(
                rating = %c.rating,
                scheme = %scheme.version,
                "tier not covered by bucket scheme, skipping hour"
            );
            continue;
        };

        let (reason, justification) = if c.is_disqualified() {
            (Some(c.explanation.clone()), None)
        } else {
            (None, Some(c.explanation.clone()))
        };

        records.push(ComparisonRecord {
            location: location.to_string(),
            datetime: hour,
            our_rating: c.rating,
            our_bucket: bucket.label.clone(),
            benchmark_rating,
            matched: bucket.contains(benchmark_rating),
            reason,
            justification,
        });
    }

    records
}

/// Share of joined hours where the buckets agreed, as a percentage.
pub fn agreement_pct(records: &[ComparisonRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let matched = records.iter().filter(|r| r.matched).count();
    (matched as f64 / records.len() as f64) * 100.0
}

fn parse_benchmark_time(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(t);
        }
    }
    None
}

fn truncate_to_hour(t: NaiveDateTime) -> NaiveDateTime {
    t.date().and_hms_opt(t.hour(), 0, 0).unwrap_or(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aligner::ForecastSample;
    use crate::classifiers::types::{WindSeverity, WindType};

    fn scheme() -> BucketScheme {
        BucketScheme::four_tier(&[
            (Rating::LakeMode, 0),
            (Rating::Sketchy, 1),
            (Rating::Playable, 1),
            (Rating::Solid, 2),
            (Rating::Firing, 3),
        ])
    }

    fn classified_at(hour: &str, rating: Rating) -> ClassifiedSample {
        ClassifiedSample {
            sample: ForecastSample {
                time: NaiveDateTime::parse_from_str(hour, "%Y-%m-%dT%H:%M").unwrap(),
                swell_height_m: 1.5,
                swell_direction_deg: 280.0,
                peak_period_s: 12.0,
                peak_period_estimated: false,
                wind_wave_height_m: 0.4,
                wind_speed_kmh: 10.0,
                wind_direction_deg: 90.0,
            },
            wind_type: WindType::Offshore,
            wind_severity: WindSeverity::Light,
            rating,
            explanation: "12s groundswell; wind offshore (light)".to_string(),
        }
    }

    fn entry(datetime: &str, rating: u8) -> BenchmarkEntry {
        BenchmarkEntry {
            datetime: datetime.to_string(),
            rating,
        }
    }

    #[test]
    fn test_fair_bucket_agrees_with_benchmark_two() {
        let records = compare(
            "Test Beach",
            &[classified_at("2025-06-01T09:00", Rating::Playable)],
            &[entry("2025-06-01T09:00:00", 2)],
            &scheme(),
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].our_bucket, "Fair");
        assert!(records[0].matched);
    }

    #[test]
    fn test_fair_bucket_disagrees_with_benchmark_three() {
        let records = compare(
            "Test Beach",
            &[classified_at("2025-06-01T09:00", Rating::Playable)],
            &[entry("2025-06-01T09:00:00", 3)],
            &scheme(),
        );

        assert_eq!(records.len(), 1);
        assert!(!records[0].matched);
    }

    #[test]
    fn test_unmatched_hours_are_dropped_both_ways() {
        let records = compare(
            "Test Beach",
            &[
                classified_at("2025-06-01T09:00", Rating::Solid),
                classified_at("2025-06-01T10:00", Rating::Solid),
            ],
            &[
                entry("2025-06-01T10:00:00", 4),
                entry("2025-06-01T11:00:00", 4),
            ],
            &scheme(),
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].datetime.hour(), 10);
    }

    #[test]
    fn test_join_truncates_benchmark_minutes() {
        let records = compare(
            "Test Beach",
            &[classified_at("2025-06-01T09:00", Rating::Solid)],
            &[entry("2025-06-01T09:37:12", 3)],
            &scheme(),
        );

        assert_eq!(records.len(), 1);
        assert!(records[0].matched);
    }

    #[test]
    fn test_offset_timestamps_parse() {
        let records = compare(
            "Test Beach",
            &[classified_at("2025-06-01T09:00", Rating::Solid)],
            &[entry("2025-06-01T09:00:00+01:00", 4)],
            &scheme(),
        );

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_disqualified_hour_carries_reason_only() {
        let records = compare(
            "Test Beach",
            &[classified_at("2025-06-01T09:00", Rating::LakeMode)],
            &[entry("2025-06-01T09:00:00", 0)],
            &scheme(),
        );

        assert!(records[0].reason.is_some());
        assert!(records[0].justification.is_none());
        assert!(records[0].matched);
    }

    #[test]
    fn test_rated_hour_carries_justification_only() {
        let records = compare(
            "Test Beach",
            &[classified_at("2025-06-01T09:00", Rating::Firing)],
            &[entry("2025-06-01T09:00:00", 8)],
            &scheme(),
        );

        assert!(records[0].reason.is_none());
        assert!(records[0].justification.is_some());
    }

    #[test]
    fn test_out_of_scale_benchmark_entry_is_skipped() {
        let records = compare(
            "Test Beach",
            &[classified_at("2025-06-01T09:00", Rating::Solid)],
            &[entry("2025-06-01T09:00:00", 11)],
            &scheme(),
        );

        assert!(records.is_empty());
    }

    #[test]
    fn test_agreement_pct() {
        let records = compare(
            "Test Beach",
            &[
                classified_at("2025-06-01T09:00", Rating::Playable),
                classified_at("2025-06-01T10:00", Rating::Playable),
            ],
            &[
                entry("2025-06-01T09:00:00", 2),
                entry("2025-06-01T10:00:00", 5),
            ],
            &scheme(),
        );

        assert_eq!(agreement_pct(&records), 50.0);
        assert_eq!(agreement_pct(&[]), 0.0);
    }
}
