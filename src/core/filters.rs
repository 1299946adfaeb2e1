use crate::core::availability::is_open;
use crate::models::{LocalInstant, QueryContext, Resource};

/// Text predicate: the (already lowercased) query is a substring of the
/// resource's name or address, ignoring case. An empty query matches.
#[inline]
pub fn matches_text(resource: &Resource, query: &str) -> bool {
    query.is_empty()
        || resource.name.to_lowercase().contains(query)
        || resource.address.to_lowercase().contains(query)
}

/// Category predicate: no category selected, or an exact match
#[inline]
pub fn matches_category(resource: &Resource, ctx: &QueryContext) -> bool {
    ctx.category().map_or(true, |category| resource.category == category)
}

/// Amenity predicate: every requested amenity must be present
#[inline]
pub fn matches_amenities(resource: &Resource, ctx: &QueryContext) -> bool {
    ctx.amenities().is_subset(&resource.amenities)
}

/// Availability predicate: only applied when the query asks for open resources
#[inline]
pub fn matches_availability(resource: &Resource, ctx: &QueryContext, now: LocalInstant) -> bool {
    !ctx.open_only() || is_open(resource, now)
}

/// Check a resource against every criterion in the query
///
/// Cheap predicates run first; the availability check is last.
#[inline]
pub fn matches_all(resource: &Resource, ctx: &QueryContext, now: LocalInstant) -> bool {
    matches_category(resource, ctx)
        && matches_amenities(resource, ctx)
        && matches_text(resource, ctx.query())
        && matches_availability(resource, ctx, now)
}

/// Select the resources that satisfy `ctx`, preserving input order
pub fn filter<'a, I>(resources: I, ctx: &QueryContext, now: LocalInstant) -> Vec<&'a Resource>
where
    I: IntoIterator<Item = &'a Resource>,
{
    resources
        .into_iter()
        .filter(|resource| matches_all(resource, ctx, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Coordinate, Schedule, TimeOfDay, Weekday};

    fn create_test_resources() -> Vec<Resource> {
        let origin = Coordinate::new(39.5, -84.7).unwrap();
        let day = |h| TimeOfDay::from_hm(h, 0).unwrap();

        vec![
            Resource::new(1, "King Library - Quiet Study", Category::Study, origin)
                .with_address("151 S Campus Ave, Oxford, OH")
                .with_amenities(["quiet", "power", "printing", "accessible"])
                .with_hours(Schedule::every_day(day(8), day(22)).unwrap()),
            Resource::new(2, "Benton Hall - CS Lab", Category::Lab, origin)
                .with_address("510 E High St, Oxford, OH")
                .with_amenities(["computers", "power", "printing", "group"])
                .with_hours(Schedule::new(Weekday::WORKWEEK, day(9), day(21)).unwrap()),
            Resource::new(3, "Howe Writing Center", Category::Tutoring, origin)
                .with_address("King Library, Oxford, OH")
                .with_amenities(["quiet", "accessible"]),
        ]
    }

    fn tuesday_morning() -> LocalInstant {
        LocalInstant::at(Weekday::Tue, 10, 0).unwrap()
    }

    fn ids(resources: &[&Resource]) -> Vec<u32> {
        resources.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_empty_context_keeps_everything() {
        let data = create_test_resources();
        let ctx = QueryContext::builder().build();

        assert_eq!(ids(&filter(&data, &ctx, tuesday_morning())), vec![1, 2, 3]);
    }

    #[test]
    fn test_text_matches_name_or_address() {
        let data = create_test_resources();

        let ctx = QueryContext::builder().query("KING").build();
        // Name of 1, address of 3
        assert_eq!(ids(&filter(&data, &ctx, tuesday_morning())), vec![1, 3]);

        let ctx = QueryContext::builder().query("high st").build();
        assert_eq!(ids(&filter(&data, &ctx, tuesday_morning())), vec![2]);
    }

    #[test]
    fn test_category_exact() {
        let data = create_test_resources();
        let ctx = QueryContext::builder().category(Some(Category::Lab)).build();

        assert_eq!(ids(&filter(&data, &ctx, tuesday_morning())), vec![2]);
    }

    #[test]
    fn test_amenities_require_all() {
        let data = create_test_resources();

        let ctx = QueryContext::builder().amenities(["quiet", "accessible"]).build();
        assert_eq!(ids(&filter(&data, &ctx, tuesday_morning())), vec![1, 3]);

        let ctx = QueryContext::builder().amenities(["quiet", "accessible", "printing"]).build();
        assert_eq!(ids(&filter(&data, &ctx, tuesday_morning())), vec![1]);

        let ctx = QueryContext::builder().amenities(["quiet", "group"]).build();
        assert!(filter(&data, &ctx, tuesday_morning()).is_empty());
    }

    #[test]
    fn test_open_only_drops_closed_and_unscheduled() {
        let data = create_test_resources();
        let ctx = QueryContext::builder().open_only(true).build();

        assert_eq!(ids(&filter(&data, &ctx, tuesday_morning())), vec![1, 2]);

        let saturday = LocalInstant::at(Weekday::Sat, 10, 0).unwrap();
        assert_eq!(ids(&filter(&data, &ctx, saturday)), vec![1]);
    }

    #[test]
    fn test_adding_criteria_never_grows_result() {
        let data = create_test_resources();
        let now = tuesday_morning();

        let loose = QueryContext::builder().query("oxford").build();
        let tighter = QueryContext::builder().query("oxford").amenities(["power"]).build();
        let tightest = QueryContext::builder()
            .query("oxford")
            .amenities(["power"])
            .open_only(true)
            .category(Some(Category::Lab))
            .build();

        let a = ids(&filter(&data, &loose, now));
        let b = ids(&filter(&data, &tighter, now));
        let c = ids(&filter(&data, &tightest, now));

        assert!(b.iter().all(|id| a.contains(id)));
        assert!(c.iter().all(|id| b.contains(id)));
        assert_eq!(c, vec![2]);
    }
}
