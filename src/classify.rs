//! Keyword-based trip request classification
//!
//! Deterministic extraction of trip parameters from free text. This is the
//! fallback interpretation path: a total function over constant lookup
//! tables, shared read-only across requests.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::request::UNKNOWN_DESTINATION;
use crate::models::{TravelStyle, TripRequest};

/// Default trip length in days when the text mentions none
pub const DEFAULT_DURATION_DAYS: u32 = 7;

/// Interest category applied when no keyword matches
pub const GENERAL_INTEREST: &str = "general";

static DAYS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*-?\s*days?").unwrap());
static WEEKS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*-?\s*weeks?").unwrap());
static MONTHS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*-?\s*months?").unwrap());

/// Interest categories and the keywords that signal them
static INTEREST_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "nature",
        &[
            "nature", "hiking", "mountains", "forest", "beach", "outdoor", "wildlife", "park",
        ],
    ),
    (
        "food",
        &[
            "food",
            "cuisine",
            "restaurant",
            "culinary",
            "cooking",
            "eating",
            "local food",
            "dining",
        ],
    ),
    (
        "history",
        &[
            "history",
            "historical",
            "museum",
            "ancient",
            "heritage",
            "culture",
            "historic",
        ],
    ),
    (
        "art",
        &[
            "art",
            "gallery",
            "painting",
            "sculpture",
            "artistic",
            "exhibition",
        ],
    ),
    (
        "technology",
        &[
            "technology",
            "tech",
            "innovation",
            "modern",
            "digital",
            "science",
        ],
    ),
    (
        "adventure",
        &[
            "adventure", "extreme", "sports", "climbing", "diving", "thrill",
        ],
    ),
    (
        "relaxation",
        &[
            "relax", "spa", "peaceful", "quiet", "calm", "rest", "wellness",
        ],
    ),
    (
        "nightlife",
        &[
            "nightlife",
            "bars",
            "clubs",
            "party",
            "entertainment",
            "night",
        ],
    ),
    (
        "shopping",
        &[
            "shopping", "market", "boutique", "souvenir", "mall", "store",
        ],
    ),
];

/// Place-name and country aliases mapped to canonical destination strings
static DESTINATION_ALIASES: &[(&str, &str)] = &[
    ("rome", "Rome, Italy"),
    ("italy", "Italy"),
    ("japan", "Japan"),
    ("tokyo", "Tokyo, Japan"),
    ("kyoto", "Kyoto, Japan"),
    ("osaka", "Osaka, Japan"),
    ("paris", "Paris, France"),
    ("france", "France"),
    ("london", "London, UK"),
    ("uk", "United Kingdom"),
    ("england", "England, UK"),
    ("spain", "Spain"),
    ("madrid", "Madrid, Spain"),
    ("barcelona", "Barcelona, Spain"),
    ("seville", "Seville, Spain"),
    ("greece", "Greece"),
    ("athens", "Athens, Greece"),
    ("santorini", "Santorini, Greece"),
    ("mykonos", "Mykonos, Greece"),
    ("thailand", "Thailand"),
    ("bangkok", "Bangkok, Thailand"),
    ("phuket", "Phuket, Thailand"),
    ("chiang mai", "Chiang Mai, Thailand"),
    ("india", "India"),
    ("delhi", "New Delhi, India"),
    ("mumbai", "Mumbai, India"),
    ("goa", "Goa, India"),
    ("rajasthan", "Rajasthan, India"),
    ("new york", "New York, USA"),
    ("usa", "United States"),
    ("america", "United States"),
    ("california", "California, USA"),
    ("los angeles", "Los Angeles, USA"),
    ("san francisco", "San Francisco, USA"),
    ("las vegas", "Las Vegas, USA"),
    ("miami", "Miami, USA"),
    ("germany", "Germany"),
    ("berlin", "Berlin, Germany"),
    ("munich", "Munich, Germany"),
    ("netherlands", "Netherlands"),
    ("amsterdam", "Amsterdam, Netherlands"),
    ("china", "China"),
    ("beijing", "Beijing, China"),
    ("shanghai", "Shanghai, China"),
    ("australia", "Australia"),
    ("sydney", "Sydney, Australia"),
    ("melbourne", "Melbourne, Australia"),
    ("canada", "Canada"),
    ("toronto", "Toronto, Canada"),
    ("vancouver", "Vancouver, Canada"),
    ("brazil", "Brazil"),
    ("rio", "Rio de Janeiro, Brazil"),
    ("sao paulo", "São Paulo, Brazil"),
    ("argentina", "Argentina"),
    ("buenos aires", "Buenos Aires, Argentina"),
    ("egypt", "Egypt"),
    ("cairo", "Cairo, Egypt"),
    ("turkey", "Turkey"),
    ("istanbul", "Istanbul, Turkey"),
    ("russia", "Russia"),
    ("moscow", "Moscow, Russia"),
    ("south korea", "South Korea"),
    ("seoul", "Seoul, South Korea"),
    ("vietnam", "Vietnam"),
    ("hanoi", "Hanoi, Vietnam"),
    ("ho chi minh", "Ho Chi Minh City, Vietnam"),
    ("singapore", "Singapore"),
    ("malaysia", "Malaysia"),
    ("kuala lumpur", "Kuala Lumpur, Malaysia"),
    ("indonesia", "Indonesia"),
    ("bali", "Bali, Indonesia"),
    ("jakarta", "Jakarta, Indonesia"),
    ("philippines", "Philippines"),
    ("manila", "Manila, Philippines"),
    ("morocco", "Morocco"),
    ("marrakech", "Marrakech, Morocco"),
    ("casablanca", "Casablanca, Morocco"),
    ("portugal", "Portugal"),
    ("lisbon", "Lisbon, Portugal"),
    ("porto", "Porto, Portugal"),
    ("croatia", "Croatia"),
    ("dubrovnik", "Dubrovnik, Croatia"),
    ("split", "Split, Croatia"),
    ("iceland", "Iceland"),
    ("reykjavik", "Reykjavik, Iceland"),
    ("norway", "Norway"),
    ("oslo", "Oslo, Norway"),
    ("bergen", "Bergen, Norway"),
    ("sweden", "Sweden"),
    ("stockholm", "Stockholm, Sweden"),
    ("denmark", "Denmark"),
    ("copenhagen", "Copenhagen, Denmark"),
];

/// Aliases ordered longest key first so multi-word aliases win over
/// substrings of them ("ho chi minh" before "chi").
static ALIASES_BY_LENGTH: LazyLock<Vec<(&str, &str)>> = LazyLock::new(|| {
    let mut aliases = DESTINATION_ALIASES.to_vec();
    aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    aliases
});

/// Style keyword bands checked in priority order; first match wins
static STYLE_BANDS: &[(TravelStyle, &[&str])] = &[
    (
        TravelStyle::Luxury,
        &["luxury", "expensive", "high-end", "premium"],
    ),
    (
        TravelStyle::Budget,
        &["budget", "cheap", "affordable", "backpack"],
    ),
    (
        TravelStyle::Relaxed,
        &["relax", "slow", "peaceful", "calm"],
    ),
    (TravelStyle::Packed, &["packed", "busy", "active", "full"]),
];

/// Classify a free-text travel request into structured trip parameters.
///
/// Total function: always returns a usable request, with the destination
/// set to the `Unknown` sentinel when nothing place-like is found.
#[must_use]
pub fn classify(text: &str) -> TripRequest {
    let text_lower = text.to_lowercase();

    TripRequest {
        destination: extract_destination(text),
        duration_days: extract_duration(&text_lower),
        interests: extract_interests(&text_lower),
        travel_style: extract_style(&text_lower),
        special_requirements: Vec::new(),
    }
}

/// Extract a trip duration in days; day mentions take priority over weeks,
/// weeks over months.
fn extract_duration(text_lower: &str) -> u32 {
    let patterns: [(&Regex, u32); 3] = [(&DAYS_RE, 1), (&WEEKS_RE, 7), (&MONTHS_RE, 30)];

    for (pattern, factor) in patterns {
        let Some(captures) = pattern.captures(text_lower) else {
            continue;
        };
        if let Ok(count) = captures[1].parse::<u32>() {
            return count.saturating_mul(factor).max(1);
        }
    }

    DEFAULT_DURATION_DAYS
}

/// Collect interest categories whose keywords occur in the text
fn extract_interests(text_lower: &str) -> Vec<String> {
    let mut interests: Vec<String> = INTEREST_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|keyword| text_lower.contains(keyword)))
        .map(|(category, _)| (*category).to_string())
        .collect();

    if interests.is_empty() {
        interests.push(GENERAL_INTEREST.to_string());
    }
    interests
}

/// Resolve a destination from alias matches, falling back to the first
/// capitalized word longer than three characters.
pub(crate) fn extract_destination(text: &str) -> String {
    let text_lower = text.to_lowercase();

    for (alias, canonical) in ALIASES_BY_LENGTH.iter() {
        if text_lower.contains(alias) {
            return (*canonical).to_string();
        }
    }

    for word in text.split_whitespace() {
        let starts_upper = word.chars().next().is_some_and(char::is_uppercase);
        if starts_upper && word.chars().count() > 3 {
            if let Some((_, canonical)) = DESTINATION_ALIASES
                .iter()
                .find(|(alias, _)| *alias == word.to_lowercase())
            {
                return (*canonical).to_string();
            }
            return word.to_string();
        }
    }

    UNKNOWN_DESTINATION.to_string()
}

fn extract_style(text_lower: &str) -> TravelStyle {
    STYLE_BANDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text_lower.contains(keyword)))
        .map_or(TravelStyle::Moderate, |(style, _)| *style)
}
