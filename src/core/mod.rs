// Core algorithm exports
pub mod availability;
pub mod distance;
pub mod filters;
pub mod finder;
pub mod ranking;

pub use availability::is_open;
pub use distance::{distance_km, haversine_distance, km_to_miles};
pub use filters::{filter, matches_all, matches_amenities, matches_availability, matches_category, matches_text};
pub use finder::{annotate, Finder, SearchResult};
pub use ranking::{rank, relevance_score};
