use crate::models::{LocalInstant, Resource};

/// Whether `resource` is open at `instant`
///
/// A resource without hours is always closed. Otherwise the weekday must be
/// listed and the time must fall within the daily window, bounds included.
/// The caller resolves "now"; nothing here reads a clock.
#[inline]
pub fn is_open(resource: &Resource, instant: LocalInstant) -> bool {
    resource
        .hours
        .as_ref()
        .is_some_and(|hours| hours.covers(instant))
}
