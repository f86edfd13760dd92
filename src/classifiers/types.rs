//! Types produced by surf-quality classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::aligner::ForecastSample;

/// The surf-quality verdict, ordered worst to best.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Rating {
    #[serde(rename = "Lake Mode")]
    LakeMode,
    Sketchy,
    Playable,
    Solid,
    Firing,
}

impl Rating {
    pub fn label(self) -> &'static str {
        match self {
            Rating::LakeMode => "Lake Mode",
            Rating::Sketchy => "Sketchy",
            Rating::Playable => "Playable",
            Rating::Solid => "Solid",
            Rating::Firing => "Firing",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Wind direction relative to the bearing a break faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindType {
    Offshore,
    CrossShore,
    Onshore,
    Glassy,
    Unknown,
}

impl fmt::Display for WindType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WindType::Offshore => "offshore",
            WindType::CrossShore => "cross-shore",
            WindType::Onshore => "onshore",
            WindType::Glassy => "glassy",
            WindType::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Wind strength band. Ordered calmest to strongest; `Unknown` sorts last.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WindSeverity {
    None,
    Light,
    Breezy,
    Strong,
    Unknown,
}

impl fmt::Display for WindSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WindSeverity::None => "none",
            WindSeverity::Light => "light",
            WindSeverity::Breezy => "breezy",
            WindSeverity::Strong => "strong",
            WindSeverity::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A [`ForecastSample`] with the verdict attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedSample {
    #[serde(flatten)]
    pub sample: ForecastSample,
    pub wind_type: WindType,
    pub wind_severity: WindSeverity,
    pub rating: Rating,
    pub explanation: String,
}

impl ClassifiedSample {
    /// True when the hour was ruled out rather than rated.
    pub fn is_disqualified(&self) -> bool {
        self.rating == Rating::LakeMode
    }
}
