use crate::core::{
    availability::is_open,
    distance::{distance_km, km_to_miles},
    filters::filter,
    ranking::rank,
};
use crate::models::{LocalInstant, QueryContext, RankedResource, Resource};

/// Result of a search
#[derive(Debug)]
pub struct SearchResult<'a> {
    pub results: Vec<RankedResource<'a>>,
    /// Resources that passed the filters, before any truncation
    pub total_matches: usize,
    pub total_resources: usize,
}

/// Query orchestrator: filter, rank, then annotate for display
///
/// # Pipeline Stages
/// 1. Predicate filtering (text, category, amenities, availability)
/// 2. Ranking by the selected strategy
/// 3. Annotation with open status and distance from the origin
/// 4. Optional truncation to `max_results`
#[derive(Debug, Clone, Default)]
pub struct Finder {
    max_results: Option<usize>,
}

impl Finder {
    pub fn new(max_results: Option<usize>) -> Self {
        Self { max_results }
    }

    pub fn unlimited() -> Self {
        Self { max_results: None }
    }

    pub fn max_results(&self) -> Option<usize> {
        self.max_results
    }

    /// Run a query against the dataset
    ///
    /// # Arguments
    /// * `resources` - The full dataset, in load order
    /// * `ctx` - Search criteria for this query
    /// * `now` - Instant used for every availability check
    pub fn search<'a>(&self, resources: &'a [Resource], ctx: &QueryContext, now: LocalInstant) -> SearchResult<'a> {
        let total_resources = resources.len();

        let filtered = filter(resources, ctx, now);
        let total_matches = filtered.len();

        tracing::debug!(
            "Filtered {} of {} resources (query={:?}, category={:?}, amenities={}, open_only={})",
            total_matches,
            total_resources,
            ctx.query(),
            ctx.category(),
            ctx.amenities().len(),
            ctx.open_only()
        );

        let ranked = rank(filtered, ctx, now);

        let mut results: Vec<RankedResource<'a>> = ranked
            .into_iter()
            .map(|resource| annotate(resource, ctx, now))
            .collect();

        if let Some(limit) = self.max_results {
            results.truncate(limit);
        }

        SearchResult {
            results,
            total_matches,
            total_resources,
        }
    }
}

/// Attach derived display values to a resource
pub fn annotate<'a>(resource: &'a Resource, ctx: &QueryContext, now: LocalInstant) -> RankedResource<'a> {
    let distance = ctx.origin().map(|origin| distance_km(origin, resource.coordinate));

    RankedResource {
        resource,
        is_open: is_open(resource, now),
        distance_km: distance,
        distance_miles: distance.map(km_to_miles),
    }
}
