use chrono::{DateTime, Datelike, TimeZone};

use crate::models::{LocalInstant, TimeOfDay};

/// Source of the current local instant
///
/// The engine never reads a clock; the service resolves "now" through this
/// trait once per request so handlers can be tested at a fixed instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> LocalInstant;
}

/// Wall clock in the host's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> LocalInstant {
        instant_of(&chrono::Local::now())
    }
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub LocalInstant);

impl Clock for FixedClock {
    fn now(&self) -> LocalInstant {
        self.0
    }
}

/// Reduce a timestamp to its weekday and minute of day
pub fn instant_of<Tz: TimeZone>(datetime: &DateTime<Tz>) -> LocalInstant {
    LocalInstant::new(
        datetime.weekday().into(),
        TimeOfDay::from(datetime.time()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday;
    use chrono::NaiveDate;

    #[test]
    fn test_instant_of() {
        // 2024-06-04 was a Tuesday
        let datetime = NaiveDate::from_ymd_opt(2024, 6, 4)
            .unwrap()
            .and_hms_opt(10, 30, 59)
            .unwrap()
            .and_utc();

        let instant = instant_of(&datetime);
        assert_eq!(instant.weekday, Weekday::Tue);
        assert_eq!(instant.time.minutes(), 630);
    }

    #[test]
    fn test_fixed_clock() {
        let at = LocalInstant::at(Weekday::Sat, 10, 0).unwrap();
        assert_eq!(FixedClock(at).now(), at);
    }

    #[test]
    fn test_system_clock_in_range() {
        let now = SystemClock.now();
        assert!(now.time <= TimeOfDay::LAST_MINUTE);
    }
}
