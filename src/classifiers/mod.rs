//! Surf-quality classification.
//!
//! This module turns one aligned [`crate::aligner::ForecastSample`] plus a
//! spot's directional profile into a graded, explained verdict: wind
//! incidence and severity first, then the disqualifier checks and the
//! period-tiered rating table.

pub mod quality;
pub mod types;
pub mod wind;
