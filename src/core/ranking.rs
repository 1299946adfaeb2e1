use crate::core::{availability::is_open, distance::distance_km};
use crate::models::{LocalInstant, QueryContext, Resource, SortStrategy};

/// Position assigned when the query does not occur in the name
pub const RELEVANCE_MISS: i64 = 9999;

/// Bonus subtracted from the relevance score of open resources
pub const OPEN_BONUS: i64 = 10;

/// Relevance score for a resource (lower ranks first)
///
/// score = (character position of `query` in the lowercased name, or
/// [`RELEVANCE_MISS`]) - ([`OPEN_BONUS`] if open)
///
/// An empty query occurs at position 0 of every name, so with no query the
/// score reduces to the open bonus.
pub fn relevance_score(resource: &Resource, query: &str, now: LocalInstant) -> i64 {
    let name = resource.name.to_lowercase();
    let position = name
        .find(query)
        .map_or(RELEVANCE_MISS, |byte_idx| name[..byte_idx].chars().count() as i64);

    let bonus = if is_open(resource, now) { OPEN_BONUS } else { 0 };
    position - bonus
}

/// Order a filtered result set by the query's sort strategy
///
/// All strategies use a stable sort, so resources with equal keys keep
/// their input order.
pub fn rank<'a>(mut resources: Vec<&'a Resource>, ctx: &QueryContext, now: LocalInstant) -> Vec<&'a Resource> {
    match ctx.sort() {
        SortStrategy::Name => {
            resources.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        }
        SortStrategy::Open => {
            resources.sort_by_cached_key(|r| !is_open(r, now));
        }
        SortStrategy::Distance => {
            // No origin: keep input order
            if let Some(origin) = ctx.origin() {
                let mut keyed: Vec<(f64, &'a Resource)> = resources
                    .into_iter()
                    .map(|r| (distance_km(origin, r.coordinate), r))
                    .collect();
                keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
                resources = keyed.into_iter().map(|(_, r)| r).collect();
            }
        }
        SortStrategy::Relevance => {
            resources.sort_by_cached_key(|r| relevance_score(r, ctx.query(), now));
        }
    }

    resources
}
