use thiserror::Error;

/// Errors raised when constructing domain values from raw input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Invalid coordinate: lat={lat}, lng={lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Unknown weekday: {0}")]
    UnknownWeekday(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Schedule closes before it opens ({open} > {close}); overnight windows are not supported")]
    OvernightSchedule { open: String, close: String },
}
