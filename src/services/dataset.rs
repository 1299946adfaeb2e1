use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::models::{Category, Resource};

/// Sample directory bundled with the binary (Miami University, Oxford OH)
const SAMPLE_DATASET: &str = include_str!("../../data/resources.json");

/// Errors that can occur while loading a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate resource id: {0}")]
    DuplicateId(u32),
}

/// The resource directory, fixed for the lifetime of the service
///
/// Load order is preserved and is the tie-break order for ranking.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    resources: Vec<Resource>,
}

impl Dataset {
    /// Wrap a list of resources, rejecting duplicate ids
    pub fn new(resources: Vec<Resource>) -> Result<Self, DatasetError> {
        let mut seen = HashSet::with_capacity(resources.len());
        for resource in &resources {
            if !seen.insert(resource.id) {
                return Err(DatasetError::DuplicateId(resource.id));
            }
        }
        Ok(Self { resources })
    }

    /// Parse a JSON array of resources
    ///
    /// Coordinates, times and schedules are validated while parsing, so a
    /// malformed record fails the whole load.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let resources: Vec<Resource> = serde_json::from_str(json)?;
        Self::new(resources)
    }

    /// Load a dataset file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let json = tokio::fs::read_to_string(path.as_ref()).await?;
        let dataset = Self::from_json(&json)?;
        tracing::info!(
            "Loaded {} resources from {}",
            dataset.len(),
            path.as_ref().display()
        );
        Ok(dataset)
    }

    /// The bundled sample directory
    pub fn sample() -> Result<Self, DatasetError> {
        Self::from_json(SAMPLE_DATASET)
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn get(&self, id: u32) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Number of resources per category, in category order; empty categories included
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|category| {
                let count = self.resources.iter().filter(|r| r.category == category).count();
                (category, count)
            })
            .collect()
    }
}
