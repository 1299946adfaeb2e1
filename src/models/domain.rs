use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::error::ModelError;

/// Geographic position in degrees
///
/// Latitude is bounded to [-90, 90] and longitude to [-180, 180]. Values are
/// validated once at construction; everything downstream can assume them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordinateRecord")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct CoordinateRecord {
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude", alias = "lon")]
    lng: f64,
}

impl TryFrom<CoordinateRecord> for Coordinate {
    type Error = ModelError;

    fn try_from(record: CoordinateRecord) -> Result<Self, Self::Error> {
        Coordinate::new(record.lat, record.lng)
    }
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self, ModelError> {
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        let lng_ok = lng.is_finite() && (-180.0..=180.0).contains(&lng);
        if !lat_ok || !lng_ok {
            return Err(ModelError::InvalidCoordinate { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[inline]
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

/// Day of the week, independent of locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Monday through Friday
    pub const WORKWEEK: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    pub fn short_name(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Weekday {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mon" | "monday" => Ok(Weekday::Mon),
            "tue" | "tues" | "tuesday" => Ok(Weekday::Tue),
            "wed" | "wednesday" => Ok(Weekday::Wed),
            "thu" | "thur" | "thurs" | "thursday" => Ok(Weekday::Thu),
            "fri" | "friday" => Ok(Weekday::Fri),
            "sat" | "saturday" => Ok(Weekday::Sat),
            "sun" | "sunday" => Ok(Weekday::Sun),
            _ => Err(ModelError::UnknownWeekday(s.to_string())),
        }
    }
}

impl TryFrom<String> for Weekday {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Mon,
            chrono::Weekday::Tue => Weekday::Tue,
            chrono::Weekday::Wed => Weekday::Wed,
            chrono::Weekday::Thu => Weekday::Thu,
            chrono::Weekday::Fri => Weekday::Fri,
            chrono::Weekday::Sat => Weekday::Sat,
            chrono::Weekday::Sun => Weekday::Sun,
        }
    }
}

/// Minutes since local midnight, always within [0, 1439]
///
/// Parsed once from `"HH:MM"` when data is loaded and serialized back the
/// same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const LAST_MINUTE: TimeOfDay = TimeOfDay(23 * 60 + 59);

    pub fn from_minutes(minutes: u16) -> Result<Self, ModelError> {
        if minutes > Self::LAST_MINUTE.0 {
            return Err(ModelError::InvalidTime(format!("{} minutes", minutes)));
        }
        Ok(Self(minutes))
    }

    pub fn from_hm(hour: u8, minute: u8) -> Result<Self, ModelError> {
        if hour > 23 || minute > 59 {
            return Err(ModelError::InvalidTime(format!("{}:{:02}", hour, minute)));
        }
        Ok(Self(hour as u16 * 60 + minute as u16))
    }

    #[inline]
    pub fn minutes(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(&self) -> u8 {
        (self.0 % 60) as u8
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidTime(s.to_string());

        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let well_formed = |part: &str, max_len: usize| {
            !part.is_empty() && part.len() <= max_len && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !well_formed(hour, 2) || !well_formed(minute, 2) || minute.len() != 2 {
            return Err(invalid());
        }

        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<chrono::NaiveTime> for TimeOfDay {
    fn from(time: chrono::NaiveTime) -> Self {
        use chrono::Timelike;
        // Leap seconds only affect the seconds field
        Self((time.hour() * 60 + time.minute()) as u16)
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

/// A point in the local week: which day, and how far into it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalInstant {
    #[serde(rename = "day")]
    pub weekday: Weekday,
    pub time: TimeOfDay,
}

impl LocalInstant {
    pub fn new(weekday: Weekday, time: TimeOfDay) -> Self {
        Self { weekday, time }
    }

    /// Shorthand for `LocalInstant::new(weekday, TimeOfDay::from_hm(hour, minute)?)`
    pub fn at(weekday: Weekday, hour: u8, minute: u8) -> Result<Self, ModelError> {
        Ok(Self::new(weekday, TimeOfDay::from_hm(hour, minute)?))
    }
}

impl fmt::Display for LocalInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.weekday, self.time)
    }
}

/// Weekly opening hours
///
/// The same daily window applies to every listed day. A window that wraps
/// past midnight (`close < open`) is rejected when the schedule is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleRecord")]
pub struct Schedule {
    open: TimeOfDay,
    close: TimeOfDay,
    days: BTreeSet<Weekday>,
}

#[derive(Deserialize)]
struct ScheduleRecord {
    open: TimeOfDay,
    close: TimeOfDay,
    #[serde(default)]
    days: Vec<Weekday>,
}

impl TryFrom<ScheduleRecord> for Schedule {
    type Error = ModelError;

    fn try_from(record: ScheduleRecord) -> Result<Self, Self::Error> {
        Schedule::new(record.days, record.open, record.close)
    }
}

impl Schedule {
    pub fn new(
        days: impl IntoIterator<Item = Weekday>,
        open: TimeOfDay,
        close: TimeOfDay,
    ) -> Result<Self, ModelError> {
        if close < open {
            return Err(ModelError::OvernightSchedule {
                open: open.to_string(),
                close: close.to_string(),
            });
        }
        Ok(Self {
            open,
            close,
            days: days.into_iter().collect(),
        })
    }

    pub fn every_day(open: TimeOfDay, close: TimeOfDay) -> Result<Self, ModelError> {
        Self::new(Weekday::ALL, open, close)
    }

    pub fn open(&self) -> TimeOfDay {
        self.open
    }

    pub fn close(&self) -> TimeOfDay {
        self.close
    }

    pub fn days(&self) -> &BTreeSet<Weekday> {
        &self.days
    }

    /// Whether the window includes `instant`; both bounds are inclusive
    #[inline]
    pub fn covers(&self, instant: LocalInstant) -> bool {
        self.days.contains(&instant.weekday) && self.open <= instant.time && instant.time <= self.close
    }

    /// Human readable form, e.g. `Mon, Tue 08:00-22:00`
    pub fn summary(&self) -> String {
        let days: Vec<&str> = self.days.iter().map(Weekday::short_name).collect();
        format!("{} {}-{}", days.join(", "), self.open, self.close)
    }
}

/// Kind of campus resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Study,
    Lab,
    Tutoring,
    Dining,
    Service,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Study,
        Category::Lab,
        Category::Tutoring,
        Category::Dining,
        Category::Service,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Study => "study",
            Category::Lab => "lab",
            Category::Tutoring => "tutoring",
            Category::Dining => "dining",
            Category::Service => "service",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ModelError::UnknownCategory(s.to_string()))
    }
}

/// A campus location or service in the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: u32,
    pub name: String,
    pub category: Category,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub amenities: BTreeSet<String>,
    /// Absent hours mean the resource is never considered open
    #[serde(default)]
    pub hours: Option<Schedule>,
}

impl Resource {
    pub fn new(id: u32, name: impl Into<String>, category: Category, coordinate: Coordinate) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            coordinate,
            address: String::new(),
            amenities: BTreeSet::new(),
            hours: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = amenities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_hours(mut self, hours: Schedule) -> Self {
        self.hours = Some(hours);
        self
    }
}

/// A resource in a ranked result set, with values derived for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResource<'a> {
    #[serde(flatten)]
    pub resource: &'a Resource,
    pub is_open: bool,
    /// Present only when the query carried an origin
    pub distance_km: Option<f64>,
    pub distance_miles: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_ranges() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(90.01, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_time_of_day_parse() {
        assert_eq!("08:00".parse::<TimeOfDay>().unwrap().minutes(), 480);
        assert_eq!("8:30".parse::<TimeOfDay>().unwrap().minutes(), 510);
        assert_eq!("23:59".parse::<TimeOfDay>().unwrap(), TimeOfDay::LAST_MINUTE);
        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("12:60".parse::<TimeOfDay>().is_err());
        assert!("1200".parse::<TimeOfDay>().is_err());
        assert!("12:5".parse::<TimeOfDay>().is_err());
        assert!("-1:00".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_time_of_day_bounds() {
        assert!(TimeOfDay::from_minutes(1439).is_ok());
        assert!(TimeOfDay::from_minutes(1440).is_err());
        assert_eq!(TimeOfDay::from_hm(7, 5).unwrap().to_string(), "07:05");
    }

    #[test]
    fn test_weekday_parse() {
        assert_eq!("Tue".parse::<Weekday>().unwrap(), Weekday::Tue);
        assert_eq!("saturday".parse::<Weekday>().unwrap(), Weekday::Sat);
        assert!("Funday".parse::<Weekday>().is_err());
        assert_eq!(Weekday::from(chrono::Weekday::Sun), Weekday::Sun);
    }

    #[test]
    fn test_overnight_schedule_rejected() {
        let open = TimeOfDay::from_hm(22, 0).unwrap();
        let close = TimeOfDay::from_hm(2, 0).unwrap();
        let result = Schedule::every_day(open, close);
        assert!(matches!(result, Err(ModelError::OvernightSchedule { .. })));
    }

    #[test]
    fn test_schedule_deduplicates_days() {
        let open = TimeOfDay::from_hm(9, 0).unwrap();
        let close = TimeOfDay::from_hm(17, 0).unwrap();
        let schedule = Schedule::new([Weekday::Mon, Weekday::Mon, Weekday::Fri], open, close).unwrap();
        assert_eq!(schedule.days().len(), 2);
        assert_eq!(schedule.summary(), "Mon, Fri 09:00-17:00");
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("lab".parse::<Category>().unwrap(), Category::Lab);
        assert!("Lab".parse::<Category>().is_err());
        assert!("gym".parse::<Category>().is_err());
    }

    #[test]
    fn test_resource_deserialize() {
        let json = r#"{
            "id": 2,
            "name": "Benton Hall - CS Lab",
            "category": "lab",
            "lat": 39.5067, "lng": -84.7316,
            "address": "510 E High St, Oxford, OH",
            "amenities": ["computers", "power", "power"],
            "hours": { "open": "09:00", "close": "21:00", "days": ["Mon","Tue","Wed","Thu","Fri"] }
        }"#;

        let resource: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.id, 2);
        assert_eq!(resource.category, Category::Lab);
        assert_eq!(resource.coordinate.lat(), 39.5067);
        assert_eq!(resource.amenities.len(), 2);

        let hours = resource.hours.unwrap();
        assert_eq!(hours.open().minutes(), 540);
        assert!(!hours.days().contains(&Weekday::Sat));
    }

    #[test]
    fn test_resource_deserialize_rejects_bad_values() {
        let bad_lat = r#"{"id": 1, "name": "x", "category": "study", "lat": 91.0, "lng": 0.0}"#;
        assert!(serde_json::from_str::<Resource>(bad_lat).is_err());

        let overnight = r#"{"id": 1, "name": "x", "category": "study", "lat": 0.0, "lng": 0.0,
            "hours": {"open": "22:00", "close": "02:00", "days": ["Mon"]}}"#;
        assert!(serde_json::from_str::<Resource>(overnight).is_err());
    }

    #[test]
    fn test_resource_without_hours() {
        let json = r#"{"id": 7, "name": "Kiosk", "category": "service", "lat": 0, "lng": 0}"#;
        let resource: Resource = serde_json::from_str(json).unwrap();
        assert!(resource.hours.is_none());
        assert!(resource.amenities.is_empty());
    }
}
