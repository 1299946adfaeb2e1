use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::core::{distance::{distance_km, km_to_miles}, is_open, Finder};
use crate::models::{
    CategoriesResponse, CategoryCount, Coordinate, ErrorResponse, HealthResponse, LocalInstant,
    ResourceDetail, SearchRequest, SearchResponse, SortStrategy,
};
use crate::services::{Clock, Dataset};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub finder: Finder,
    pub clock: Arc<dyn Clock>,
    pub default_sort: SortStrategy,
}

/// Configure all resource-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/resources/search", web::post().to(search_resources))
        .route("/resources/{id}", web::get().to(get_resource))
        .route("/categories", web::get().to(list_categories));
}

fn bad_request(error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.dataset.is_empty() { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        resources: state.dataset.len(),
        timestamp: chrono::Utc::now(),
    })
}

/// Search endpoint
///
/// POST /api/v1/resources/search
///
/// Request body:
/// ```json
/// {
///   "q": "library",
///   "category": "study",
///   "amenities": ["quiet", "power"],
///   "openOnly": true,
///   "sort": "relevance|name|open|distance",
///   "origin": { "lat": 39.5094, "lng": -84.7389 },
///   "at": { "day": "Tue", "time": "10:00" }
/// }
/// ```
async fn search_resources(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::warn!("Validation failed for search request: {}", errors);
        return bad_request("Validation failed", errors);
    }

    let ctx = match req.to_context(state.default_sort) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::warn!("Rejected search request: {}", e);
            return bad_request("Invalid search criteria", e);
        }
    };

    let now = match req.instant() {
        Ok(Some(at)) => at,
        Ok(None) => state.clock.now(),
        Err(e) => {
            tracing::warn!("Rejected search instant: {}", e);
            return bad_request("Invalid instant", e);
        }
    };

    let result = state.finder.search(state.dataset.resources(), &ctx, now);

    tracing::info!(
        "Returning {} of {} matches (sort={}, at={})",
        result.results.len(),
        result.total_matches,
        ctx.sort(),
        now
    );

    HttpResponse::Ok().json(SearchResponse {
        results: result.results,
        total_results: result.total_matches,
        total_resources: result.total_resources,
        sort: ctx.sort(),
        evaluated_at: now,
    })
}

/// Optional parameters for a resource lookup
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub day: Option<String>,
    pub time: Option<String>,
}

impl DetailQuery {
    fn origin(&self) -> Result<Option<Coordinate>, crate::models::ModelError> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Coordinate::new(lat, lng).map(Some),
            _ => Ok(None),
        }
    }

    fn instant(&self) -> Result<Option<LocalInstant>, crate::models::ModelError> {
        match (&self.day, &self.time) {
            (Some(day), Some(time)) => Ok(Some(LocalInstant::new(day.parse()?, time.parse()?))),
            _ => Ok(None),
        }
    }
}

/// Resource detail endpoint
///
/// GET /api/v1/resources/{id}?lat={lat}&lng={lng}&day={day}&time={HH:MM}
async fn get_resource(
    state: web::Data<AppState>,
    path: web::Path<u32>,
    query: web::Query<DetailQuery>,
) -> impl Responder {
    let id = path.into_inner();

    let Some(resource) = state.dataset.get(id) else {
        return HttpResponse::NotFound().json(ErrorResponse {
            error: "Resource not found".to_string(),
            message: format!("No resource with id {}", id),
            status_code: 404,
        });
    };

    let origin = match query.origin() {
        Ok(origin) => origin,
        Err(e) => return bad_request("Invalid origin", e),
    };
    let now = match query.instant() {
        Ok(at) => at.unwrap_or_else(|| state.clock.now()),
        Err(e) => return bad_request("Invalid instant", e),
    };

    HttpResponse::Ok().json(ResourceDetail {
        resource,
        is_open: is_open(resource, now),
        hours_summary: resource.hours.as_ref().map(|h| h.summary()),
        distance_miles: origin.map(|o| km_to_miles(distance_km(o, resource.coordinate))),
        evaluated_at: now,
    })
}

/// Category listing endpoint
///
/// GET /api/v1/categories
async fn list_categories(state: web::Data<AppState>) -> impl Responder {
    let categories = state
        .dataset
        .category_counts()
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect();

    HttpResponse::Ok().json(CategoriesResponse { categories })
}
