use serde::{Deserialize, Serialize};

use crate::models::domain::{Category, LocalInstant, RankedResource, Resource};
use crate::models::query::SortStrategy;

/// Response for the search endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse<'a> {
    pub results: Vec<RankedResource<'a>>,
    /// Number of resources that passed the filters, before truncation
    pub total_results: usize,
    pub total_resources: usize,
    pub sort: SortStrategy,
    pub evaluated_at: LocalInstant,
}

/// Response for a single resource lookup
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDetail<'a> {
    #[serde(flatten)]
    pub resource: &'a Resource,
    pub is_open: bool,
    pub hours_summary: Option<String>,
    pub distance_miles: Option<f64>,
    pub evaluated_at: LocalInstant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryCount>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub resources: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
