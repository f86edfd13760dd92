//! Trait and loaders for the surf-spot catalog.

use anyhow::Result;
use async_trait::async_trait;

use surf_rater::spots::{SurfSpot, builtin_spots};

/// Abstraction over wherever the spot reference data lives.
#[async_trait]
pub trait SpotCatalog {
    async fn list_spots(&self) -> Result<Vec<SurfSpot>>;
}

/// The compiled-in launch catalog.
pub struct BuiltinCatalog;

#[async_trait]
impl SpotCatalog for BuiltinCatalog {
    async fn list_spots(&self) -> Result<Vec<SurfSpot>> {
        Ok(builtin_spots())
    }
}

/// A catalog maintained as a JSON array of spots on disk.
pub struct JsonFileCatalog {
    path: String,
}

impl JsonFileCatalog {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }
}

#[async_trait]
impl SpotCatalog for JsonFileCatalog {
    async fn list_spots(&self) -> Result<Vec<SurfSpot>> {
        let content = std::fs::read_to_string(&self.path)?;
        let spots: Vec<SurfSpot> = serde_json::from_str(&content)?;
        Ok(spots)
    }
}
