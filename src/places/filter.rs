//! Interest-based place filtering

use crate::models::Place;

/// Keywords that mark a place as relevant to an interest. Distinct from the
/// category derivation table: this one matches against place text, not
/// lookup categories.
static INTEREST_MATCH_KEYWORDS: &[(&str, &[&str])] = &[
    ("food", &["restaurant", "cafe", "food", "cuisine", "dining"]),
    ("nature", &["park", "garden", "nature", "outdoor", "hiking"]),
    (
        "history",
        &["museum", "historical", "ancient", "heritage", "monument"],
    ),
    ("art", &["gallery", "art", "exhibition", "cultural"]),
    ("technology", &["tech", "science", "innovation", "modern"]),
    ("adventure", &["adventure", "sports", "activity", "thrill"]),
    ("relaxation", &["spa", "peaceful", "quiet", "relaxing"]),
    ("nightlife", &["bar", "club", "nightlife", "entertainment"]),
    ("shopping", &["shop", "market", "mall", "boutique"]),
];

/// Keep the places whose text matches at least one requested interest.
///
/// Order-preserving. An empty interest list keeps everything; an interest
/// with no keyword entry matches nothing.
#[must_use]
pub fn filter_by_interest(places: Vec<Place>, interests: &[String]) -> Vec<Place> {
    if interests.is_empty() {
        return places;
    }

    places
        .into_iter()
        .filter(|place| {
            let haystack = format!(
                "{} {} {}",
                place.name, place.description, place.category
            )
            .to_lowercase();

            interests.iter().any(|interest| {
                INTEREST_MATCH_KEYWORDS
                    .iter()
                    .find(|(category, _)| category == interest)
                    .is_some_and(|(_, keywords)| {
                        keywords.iter().any(|keyword| haystack.contains(keyword))
                    })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str, description: &str, category: &str) -> Place {
        Place {
            name: name.to_string(),
            category: category.to_string(),
            rating: None,
            address: "Somewhere".to_string(),
            coordinates: None,
            description: description.to_string(),
            external_id: String::new(),
        }
    }

    #[test]
    fn test_empty_interests_pass_everything_through() {
        let places = vec![
            place("Colosseum", "Ancient arena", "tourist_attraction"),
            place("Da Enzo", "Roman trattoria", "restaurant"),
        ];
        let kept = filter_by_interest(places.clone(), &[]);
        assert_eq!(kept, places);
    }

    #[test]
    fn test_matching_is_textual() {
        let places = vec![
            place("Colosseum", "Ancient arena", "tourist_attraction"),
            place("Da Enzo", "Roman trattoria", "restaurant"),
            place("City Spa", "Peaceful retreat", "spa"),
        ];

        let kept = filter_by_interest(places, &["history".to_string(), "food".to_string()]);
        let names: Vec<&str> = kept.iter().map(|p| p.name.as_str()).collect();
        // "Ancient" matches history, "restaurant" matches food; the spa
        // matches neither requested interest
        assert_eq!(names, vec!["Colosseum", "Da Enzo"]);
    }

    #[test]
    fn test_unknown_interest_matches_nothing() {
        let places = vec![place("Colosseum", "Ancient arena", "tourist_attraction")];
        let kept = filter_by_interest(places, &["general".to_string()]);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let places = vec![
            place("B Museum", "old things", "museum"),
            place("A Museum", "older things", "museum"),
        ];
        let kept = filter_by_interest(places, &["history".to_string()]);
        let names: Vec<&str> = kept.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B Museum", "A Museum"]);
    }
}
