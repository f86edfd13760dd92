//! Rating-scale bucket configuration.
//!
//! Two incompatible scale generations have existed: a 4-bucket scheme with
//! published benchmark ranges, and a 5-tier scheme with no published
//! mapping at all. Which one a deployment compares under is configuration,
//! never a hardcoded table.

use serde::{Deserialize, Serialize};

use crate::classifiers::types::Rating;

/// One bucket of a scheme: its label, the inclusive span of benchmark
/// values it covers, and the classifier tiers assigned into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingBucket {
    pub label: String,
    pub benchmark_min: u8,
    pub benchmark_max: u8,
    pub tiers: Vec<Rating>,
}

impl RatingBucket {
    /// Whether a scraped benchmark value falls inside this bucket.
    pub fn contains(&self, benchmark: u8) -> bool {
        self.benchmark_min <= benchmark && benchmark <= self.benchmark_max
    }
}

/// Injectable mapping between classifier tiers and the scraped 0–10 scale.
///
/// Build the published 4-bucket generation with [`BucketScheme::four_tier`]
/// or load a deployment-specific scheme with
/// [`BucketScheme::from_json_file`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketScheme {
    pub version: String,
    pub buckets: Vec<RatingBucket>,
}

impl BucketScheme {
    /// The historical 4-bucket scheme: Poor {0}, Fair {1,2}, Good {3,4},
    /// Excellent {5..10}. No published assignment of the current tiers onto
    /// these buckets exists, so the caller supplies one: `assign` maps each
    /// tier to a bucket index 0..=3. Tiers pointed at an out-of-range index
    /// are left unassigned.
    pub fn four_tier(assign: &[(Rating, usize)]) -> Self {
        fn bucket(label: &str, min: u8, max: u8) -> RatingBucket {
            RatingBucket {
                label: label.to_string(),
                benchmark_min: min,
                benchmark_max: max,
                tiers: Vec::new(),
            }
        }

        let mut buckets = vec![
            bucket("Poor", 0, 0),
            bucket("Fair", 1, 2),
            bucket("Good", 3, 4),
            bucket("Excellent", 5, 10),
        ];
        for (tier, idx) in assign {
            if let Some(b) = buckets.get_mut(*idx) {
                b.tiers.push(*tier);
            }
        }

        Self {
            version: "four-tier-v1".to_string(),
            buckets,
        }
    }

    /// Loads a scheme from a JSON file on disk.
    pub fn from_json_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// The bucket `rating` is assigned to, with its index, if the scheme
    /// covers that tier.
    pub fn bucket_for(&self, rating: Rating) -> Option<(usize, &RatingBucket)> {
        self.buckets
            .iter()
            .enumerate()
            .find(|(_, b)| b.tiers.contains(&rating))
    }
}
