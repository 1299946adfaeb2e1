//! Campus Finder - search, filtering and ranking over a campus resource directory
//!
//! The query engine lives in [`core`]: great-circle distance, weekly
//! availability checks, predicate filtering and multi-strategy ranking over
//! an immutable, in-memory dataset. The HTTP service in [`routes`] wraps it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance::{distance_km, km_to_miles}, filter, is_open, rank, Finder, SearchResult};
pub use models::{Category, Coordinate, LocalInstant, QueryContext, RankedResource, Resource, Schedule, SortStrategy, TimeOfDay, Weekday};
pub use services::{Clock, Dataset, DatasetError, FixedClock, SystemClock};
