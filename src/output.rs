//! CSV persistence for classified forecasts and comparison reports.
//!
//! Classified rows append to a per-deployment CSV keyed downstream by
//! (spot, timestamp_local); comparison reports are written whole.

use std::fs::{File, OpenOptions};
use std::path::Path;

use anyhow::Result;
use chrono::NaiveDateTime;
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aligner::ForecastSample;
use crate::classifiers::types::{ClassifiedSample, Rating, WindSeverity, WindType};

/// One persisted row of classified forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub spot: String,
    pub timestamp_local: NaiveDateTime,
    pub swell_height_m: f64,
    pub swell_direction_deg: f64,
    pub peak_period_s: f64,
    pub peak_period_estimated: bool,
    pub wind_wave_height_m: f64,
    pub wind_speed_kmh: f64,
    pub wind_direction_deg: f64,
    pub wind_type: WindType,
    pub wind_severity: WindSeverity,
    pub rating: Rating,
    pub explanation: String,
}

impl ForecastRow {
    pub fn new(spot: &str, classified: &ClassifiedSample) -> Self {
        Self {
            spot: spot.to_string(),
            timestamp_local: classified.sample.time,
            swell_height_m: classified.sample.swell_height_m,
            swell_direction_deg: classified.sample.swell_direction_deg,
            peak_period_s: classified.sample.peak_period_s,
            peak_period_estimated: classified.sample.peak_period_estimated,
            wind_wave_height_m: classified.sample.wind_wave_height_m,
            wind_speed_kmh: classified.sample.wind_speed_kmh,
            wind_direction_deg: classified.sample.wind_direction_deg,
            wind_type: classified.wind_type,
            wind_severity: classified.wind_severity,
            rating: classified.rating,
            explanation: classified.explanation.clone(),
        }
    }

    /// Rebuilds the classified sample, e.g. when a stored CSV is fed back
    /// into the benchmark comparator.
    pub fn to_classified(&self) -> ClassifiedSample {
        ClassifiedSample {
            sample: ForecastSample {
                time: self.timestamp_local,
                swell_height_m: self.swell_height_m,
                swell_direction_deg: self.swell_direction_deg,
                peak_period_s: self.peak_period_s,
                peak_period_estimated: self.peak_period_estimated,
                wind_wave_height_m: self.wind_wave_height_m,
                wind_speed_kmh: self.wind_speed_kmh,
                wind_direction_deg: self.wind_direction_deg,
            },
            wind_type: self.wind_type,
            wind_severity: self.wind_severity,
            rating: self.rating,
            explanation: self.explanation.clone(),
        }
    }
}

/// Appends one serializable record to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record<T: Serialize>(path: &str, record: &T) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}

/// Writes a whole batch to a fresh CSV file, headers included.
pub fn write_records<T: Serialize>(path: &str, records: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads every row of a classified-forecast CSV.
pub fn load_rows(path: &str) -> Result<Vec<ForecastRow>> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: ForecastRow = result?;
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn row() -> ForecastRow {
        ForecastRow {
            spot: "Test Beach".to_string(),
            timestamp_local: NaiveDateTime::parse_from_str(
                "2025-06-01T09:00",
                "%Y-%m-%dT%H:%M",
            )
            .unwrap(),
            swell_height_m: 1.5,
            swell_direction_deg: 280.0,
            peak_period_s: 13.0,
            peak_period_estimated: false,
            wind_wave_height_m: 0.4,
            wind_speed_kmh: 10.0,
            wind_direction_deg: 90.0,
            wind_type: WindType::Offshore,
            wind_severity: WindSeverity::Light,
            rating: Rating::Firing,
            explanation: "13s groundswell with offshore wind at 10 km/h".to_string(),
        }
    }

    #[test]
    fn test_append_record_creates_file() {
        let path = temp_path("surf_rater_test_create.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        append_record(&path, &row()).unwrap();

        assert!(Path::new(&path).exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_record_writes_header_once() {
        let path = temp_path("surf_rater_test_header.csv");
        let _ = fs::remove_file(&path);

        append_record(&path, &row()).unwrap();
        append_record(&path, &row()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content
            .lines()
            .filter(|l| l.contains("timestamp_local"))
            .count();
        assert_eq!(header_count, 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_then_load_round_trips() {
        let path = temp_path("surf_rater_test_rows.csv");
        let _ = fs::remove_file(&path);

        append_record(&path, &row()).unwrap();
        append_record(&path, &row()).unwrap();

        let rows = load_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], row());
        assert_eq!(rows[0].rating, Rating::Firing);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_records_includes_headers() {
        let path = temp_path("surf_rater_test_batch.csv");
        let _ = fs::remove_file(&path);

        write_records(&path, &[row(), row()]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_row_round_trips_to_classified() {
        let r = row();
        let classified = r.to_classified();
        assert_eq!(ForecastRow::new("Test Beach", &classified), r);
    }
}
