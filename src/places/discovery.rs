//! Place discovery, deduplication and ranking
//!
//! Derives lookup categories from the requested interests, fans the lookup
//! collaborator out per category, then merges, deduplicates and ranks the
//! results. Discovery never fails: a category whose lookup errors is
//! skipped, and the worst case is an empty list.

use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::models::Place;
use crate::places::filter::filter_by_interest;
use crate::places::lookup::PlaceLookupService;

/// Lookup categories queried when no interest maps to any
pub const DEFAULT_CATEGORIES: &[&str] = &["tourist_attraction", "restaurant", "museum"];

/// At most this many categories are queried per discovery pass
const MAX_CATEGORIES_PER_QUERY: usize = 5;

/// Discovered places are capped at this count after ranking
const MAX_DISCOVERED_PLACES: usize = 20;

/// Lookup categories associated with each interest
static INTEREST_CATEGORIES: &[(&str, &[&str])] = &[
    ("food", &["restaurant", "cafe", "bakery", "meal_takeaway"]),
    ("nature", &["park", "natural_feature", "zoo"]),
    ("history", &["museum", "church", "tourist_attraction"]),
    ("art", &["art_gallery", "museum"]),
    ("technology", &["electronics_store", "museum"]),
    ("adventure", &["amusement_park", "gym", "tourist_attraction"]),
    ("relaxation", &["spa", "park", "beach"]),
    ("shopping", &["shopping_mall", "store", "clothing_store"]),
    ("general", &["tourist_attraction", "point_of_interest"]),
];

/// Place discovery over a lookup collaborator
pub struct PlaceDiscovery {
    lookup: Arc<dyn PlaceLookupService>,
    radius_meters: u32,
}

impl PlaceDiscovery {
    #[must_use]
    pub fn new(lookup: Arc<dyn PlaceLookupService>, radius_meters: u32) -> Self {
        Self {
            lookup,
            radius_meters,
        }
    }

    /// Discover places for a destination.
    ///
    /// Categories derive from the interests unless supplied explicitly.
    /// Returns at most 20 places, deduplicated by `(name, address)` and
    /// sorted by rating with unrated places last.
    pub async fn discover(
        &self,
        destination: &str,
        interests: &[String],
        categories: Option<&[String]>,
    ) -> Vec<Place> {
        let categories = match categories {
            Some(explicit) => explicit.to_vec(),
            None => derive_categories(interests),
        };

        debug!(%destination, ?categories, "discovering places");

        let queries = categories
            .iter()
            .take(MAX_CATEGORIES_PER_QUERY)
            .map(|category| async move {
                let result = self
                    .lookup
                    .search(destination, category, self.radius_meters)
                    .await;
                (category, result)
            });

        // Fan out per category; the merge below keeps category order, so
        // concurrency does not affect the result
        let mut collected = Vec::new();
        for (category, result) in join_all(queries).await {
            match result {
                Ok(places) => collected.extend(places),
                Err(e) => warn!(%category, "place lookup failed, skipping category: {e}"),
            }
        }

        let mut unique = dedup_places(collected);

        // Stable sort: unrated places sink, ties keep discovery order
        unique.sort_by(|a, b| {
            b.rating_for_ordering()
                .total_cmp(&a.rating_for_ordering())
        });
        unique.truncate(MAX_DISCOVERED_PLACES);

        info!(
            "discovered {} unique places in {}",
            unique.len(),
            destination
        );
        unique
    }

    /// Curated recommendations: discovery narrowed by interest, backfilled
    /// with generic finds up to `max_places`.
    pub async fn recommendations(
        &self,
        destination: &str,
        interests: &[String],
        max_places: usize,
    ) -> Vec<Place> {
        let discovered = self.discover(destination, interests, None).await;
        let mut recommended = filter_by_interest(discovered, interests);

        if recommended.len() < max_places {
            let general = vec!["general".to_string()];
            let backfill = self.discover(destination, &general, None).await;
            for place in backfill {
                if recommended.len() >= max_places {
                    break;
                }
                if !recommended.contains(&place) {
                    recommended.push(place);
                }
            }
        }

        recommended.truncate(max_places);
        recommended
    }
}

/// Union of the category lists for the requested interests, first
/// occurrence wins; unknown interests contribute nothing.
fn derive_categories(interests: &[String]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for interest in interests {
        let Some((_, mapped)) = INTEREST_CATEGORIES
            .iter()
            .find(|(name, _)| name == interest)
        else {
            continue;
        };
        for category in *mapped {
            if seen.insert(category) {
                categories.push((*category).to_string());
            }
        }
    }

    if categories.is_empty() {
        categories = DEFAULT_CATEGORIES
            .iter()
            .map(|category| (*category).to_string())
            .collect();
    }

    categories
}

/// Drop later occurrences of the same `(name, address)` pair
fn dedup_places(places: Vec<Place>) -> Vec<Place> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    places
        .into_iter()
        .filter(|place| {
            let (name, address) = place.dedup_key();
            seen.insert((name.to_string(), address.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use crate::Result;
    use async_trait::async_trait;

    fn place(name: &str, address: &str, category: &str, rating: Option<f32>) -> Place {
        Place {
            name: name.to_string(),
            category: category.to_string(),
            rating,
            address: address.to_string(),
            coordinates: None,
            description: String::new(),
            external_id: String::new(),
        }
    }

    /// Lookup stub that records queried categories and fails on demand
    struct ScriptedLookup {
        fail_categories: Vec<&'static str>,
    }

    #[async_trait]
    impl PlaceLookupService for ScriptedLookup {
        async fn search(
            &self,
            location: &str,
            category: &str,
            _radius_meters: u32,
        ) -> Result<Vec<Place>> {
            if self.fail_categories.contains(&category) {
                return Err(PlannerError::timeout("scripted failure"));
            }
            Ok(vec![
                place(&format!("{category} one"), location, category, Some(4.0)),
                place("Shared Landmark", location, category, Some(4.5)),
            ])
        }
    }

    fn discovery(fail_categories: Vec<&'static str>) -> PlaceDiscovery {
        PlaceDiscovery::new(Arc::new(ScriptedLookup { fail_categories }), 50_000)
    }

    #[test]
    fn test_derive_categories_union() {
        let interests = vec!["history".to_string(), "art".to_string()];
        let categories = derive_categories(&interests);
        // museum appears once, first occurrence order preserved
        assert_eq!(
            categories,
            vec!["museum", "church", "tourist_attraction", "art_gallery"]
        );
    }

    #[test]
    fn test_derive_categories_defaults() {
        assert_eq!(
            derive_categories(&["stargazing".to_string()]),
            vec!["tourist_attraction", "restaurant", "museum"]
        );
        assert_eq!(
            derive_categories(&[]),
            vec!["tourist_attraction", "restaurant", "museum"]
        );
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let places = vec![
            place("Pantheon", "Rome", "tourist_attraction", Some(4.5)),
            place("Pantheon", "Rome", "museum", Some(4.2)),
            place("Pantheon", "Paris", "tourist_attraction", Some(4.4)),
        ];
        let unique = dedup_places(places);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].category, "tourist_attraction");
        assert_eq!(unique[1].address, "Paris");
    }

    #[tokio::test]
    async fn test_failed_category_is_skipped() {
        let discovery = discovery(vec!["church"]);
        let interests = vec!["history".to_string()];
        let places = discovery.discover("Rome, Italy", &interests, None).await;

        // museum and tourist_attraction categories still answer
        assert!(!places.is_empty());
        assert!(places.iter().all(|p| p.category != "church"));
    }

    #[tokio::test]
    async fn test_discovery_dedups_across_categories() {
        let discovery = discovery(vec![]);
        let interests = vec!["history".to_string()];
        let places = discovery.discover("Rome, Italy", &interests, None).await;

        let shared: Vec<&Place> = places
            .iter()
            .filter(|p| p.name == "Shared Landmark")
            .collect();
        assert_eq!(shared.len(), 1);
        // First-seen occurrence came from the first derived category
        assert_eq!(shared[0].category, "museum");
    }

    #[tokio::test]
    async fn test_ranking_is_stable_and_unrated_sink() {
        struct MixedRatings;

        #[async_trait]
        impl PlaceLookupService for MixedRatings {
            async fn search(&self, location: &str, category: &str, _r: u32) -> Result<Vec<Place>> {
                Ok(vec![
                    place("Unrated Early", location, category, None),
                    place("Four A", location, category, Some(4.0)),
                    place("Five", location, category, Some(5.0)),
                    place("Four B", location, category, Some(4.0)),
                ])
            }
        }

        let discovery = PlaceDiscovery::new(Arc::new(MixedRatings), 50_000);
        let categories = vec!["museum".to_string()];
        let places = discovery
            .discover("Rome, Italy", &[], Some(&categories))
            .await;

        let names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Five", "Four A", "Four B", "Unrated Early"]);
    }

    #[tokio::test]
    async fn test_all_lookups_failing_yields_empty() {
        struct AlwaysFails;

        #[async_trait]
        impl PlaceLookupService for AlwaysFails {
            async fn search(&self, _l: &str, _c: &str, _r: u32) -> Result<Vec<Place>> {
                Err(PlannerError::unavailable("down"))
            }
        }

        let discovery = PlaceDiscovery::new(Arc::new(AlwaysFails), 50_000);
        let places = discovery
            .discover("Rome, Italy", &["food".to_string()], None)
            .await;
        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn test_recommendations_backfill_and_cap() {
        use crate::places::fixtures::FixtureCatalog;

        let discovery = PlaceDiscovery::new(Arc::new(FixtureCatalog::new()), 50_000);
        let interests = vec!["history".to_string(), "food".to_string()];
        let places = discovery
            .recommendations("Rome, Italy", &interests, 15)
            .await;

        assert!(places.len() <= 15);

        // No duplicate (name, address) pairs survive the backfill
        let mut seen = HashSet::new();
        for place in &places {
            assert!(seen.insert((place.name.clone(), place.address.clone())));
        }
    }
}
