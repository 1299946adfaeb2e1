// Service exports
pub mod clock;
pub mod dataset;

pub use clock::{instant_of, Clock, FixedClock, SystemClock};
pub use dataset::{Dataset, DatasetError};
