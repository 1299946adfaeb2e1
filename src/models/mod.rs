// Model exports
pub mod domain;
pub mod error;
pub mod query;
pub mod requests;
pub mod responses;

pub use domain::{Category, Coordinate, LocalInstant, RankedResource, Resource, Schedule, TimeOfDay, Weekday};
pub use error::ModelError;
pub use query::{QueryContext, QueryContextBuilder, SortStrategy};
pub use requests::{InstantParam, OriginParam, SearchRequest};
pub use responses::{CategoriesResponse, CategoryCount, ErrorResponse, HealthResponse, ResourceDetail, SearchResponse};
