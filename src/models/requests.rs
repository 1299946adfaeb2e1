use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::domain::{Category, Coordinate, LocalInstant, TimeOfDay, Weekday};
use super::error::ModelError;
use super::query::{QueryContext, SortStrategy};

/// Request to search the directory
///
/// Every field is optional; an empty request returns the whole dataset in
/// relevance order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default, alias = "query")]
    #[validate(length(max = 200))]
    pub q: String,
    /// Empty means any category
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default, alias = "open")]
    pub open_only: bool,
    /// Unset uses the configured default
    #[serde(default)]
    pub sort: Option<SortStrategy>,
    #[validate(nested)]
    pub origin: Option<OriginParam>,
    /// Evaluate availability at this instant instead of the server clock
    pub at: Option<InstantParam>,
}

/// Caller position supplied by an external location service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_origin"))]
pub struct OriginParam {
    pub lat: f64,
    pub lng: f64,
}

fn validate_origin(origin: &OriginParam) -> Result<(), ValidationError> {
    Coordinate::new(origin.lat, origin.lng)
        .map(|_| ())
        .map_err(|_| ValidationError::new("origin_out_of_range"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstantParam {
    pub day: String,
    pub time: String,
}

impl SearchRequest {
    /// Build the immutable query context for this request
    pub fn to_context(&self, default_sort: SortStrategy) -> Result<QueryContext, ModelError> {
        let category = match self.category.trim() {
            "" => None,
            key => Some(key.parse::<Category>()?),
        };

        let amenities = self
            .amenities
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        let origin = self
            .origin
            .map(|o| Coordinate::new(o.lat, o.lng))
            .transpose()?;

        Ok(QueryContext::builder()
            .query(&self.q)
            .category(category)
            .amenities(amenities)
            .open_only(self.open_only)
            .sort(self.sort.unwrap_or(default_sort))
            .origin(origin)
            .build())
    }

    /// The caller-supplied evaluation instant, if any
    pub fn instant(&self) -> Result<Option<LocalInstant>, ModelError> {
        self.at.as_ref().map(InstantParam::to_instant).transpose()
    }
}

impl InstantParam {
    pub fn to_instant(&self) -> Result<LocalInstant, ModelError> {
        let weekday: Weekday = self.day.parse()?;
        let time: TimeOfDay = self.time.parse()?;
        Ok(LocalInstant::new(weekday, time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_request_is_unfiltered() {
        let req: SearchRequest = serde_json::from_str("{}").unwrap();
        let ctx = req.to_context(SortStrategy::Relevance).unwrap();

        assert_eq!(ctx.query(), "");
        assert!(ctx.category().is_none());
        assert!(ctx.amenities().is_empty());
        assert!(!ctx.open_only());
        assert_eq!(ctx.sort(), SortStrategy::Relevance);
        assert!(req.instant().unwrap().is_none());
    }

    #[test]
    fn test_missing_sort_uses_default() {
        let req: SearchRequest = serde_json::from_str(r#"{"q": "lab"}"#).unwrap();
        let ctx = req.to_context(SortStrategy::Name).unwrap();
        assert_eq!(ctx.sort(), SortStrategy::Name);

        let req: SearchRequest = serde_json::from_str(r#"{"sort": "bogus"}"#).unwrap();
        let ctx = req.to_context(SortStrategy::Name).unwrap();
        assert_eq!(ctx.sort(), SortStrategy::Relevance);
    }

    #[test]
    fn test_full_request() {
        let json = r#"{
            "q": " Hall ",
            "category": "lab",
            "amenities": ["power", " ", "printing"],
            "openOnly": true,
            "sort": "distance",
            "origin": { "lat": 39.5, "lng": -84.7 },
            "at": { "day": "Tue", "time": "10:00" }
        }"#;
        let req: SearchRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_ok());

        let ctx = req.to_context(SortStrategy::Relevance).unwrap();
        assert_eq!(ctx.query(), "hall");
        assert_eq!(ctx.category(), Some(Category::Lab));
        assert_eq!(ctx.amenities().len(), 2);
        assert!(ctx.open_only());
        assert_eq!(ctx.sort(), SortStrategy::Distance);
        assert!(ctx.origin().is_some());

        let at = req.instant().unwrap().unwrap();
        assert_eq!(at.weekday, Weekday::Tue);
        assert_eq!(at.time.minutes(), 600);
    }

    #[test]
    fn test_out_of_range_origin_fails_validation() {
        let json = r#"{ "origin": { "lat": 120.0, "lng": 0.0 } }"#;
        let req: SearchRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_err());
        assert!(req.to_context(SortStrategy::Relevance).is_err());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let req = SearchRequest {
            category: "gym".to_string(),
            ..Default::default()
        };
        assert!(matches!(req.to_context(SortStrategy::Relevance), Err(ModelError::UnknownCategory(_))));
    }

    #[test]
    fn test_malformed_instant_rejected() {
        let req = SearchRequest {
            at: Some(InstantParam {
                day: "Tue".to_string(),
                time: "25:00".to_string(),
            }),
            ..Default::default()
        };
        assert!(req.instant().is_err());
    }
}
