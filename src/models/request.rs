//! Structured trip request extracted from free-text input

use serde::{Deserialize, Serialize};

/// Sentinel destination used when no place could be extracted from the text
pub const UNKNOWN_DESTINATION: &str = "Unknown";

/// Pacing and budget preference for a trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Budget,
    #[default]
    Moderate,
    Luxury,
    Relaxed,
    Packed,
    Adventure,
}

impl TravelStyle {
    /// Parse a style tag, defaulting to `Moderate` for unknown values
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "budget" => Self::Budget,
            "luxury" => Self::Luxury,
            "relaxed" => Self::Relaxed,
            "packed" => Self::Packed,
            "adventure" => Self::Adventure,
            _ => Self::Moderate,
        }
    }

    /// Lowercase tag as used in prompts and serialized output
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Moderate => "moderate",
            Self::Luxury => "luxury",
            Self::Relaxed => "relaxed",
            Self::Packed => "packed",
            Self::Adventure => "adventure",
        }
    }

    /// Sightseeing activities scheduled per day by the deterministic planner
    #[must_use]
    pub fn activities_per_day(self) -> usize {
        match self {
            Self::Relaxed | Self::Luxury => 2,
            Self::Moderate | Self::Budget => 3,
            Self::Packed | Self::Adventure => 4,
        }
    }
}

/// Trip parameters derived from a user's natural-language request.
///
/// Derived per request, never persisted. `interests` is non-empty (defaults
/// to `general`) and `duration_days` is at least 1 by the time either is
/// produced by the interpreter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub destination: String,
    pub duration_days: u32,
    pub interests: Vec<String>,
    pub travel_style: TravelStyle,
    #[serde(default)]
    pub special_requirements: Vec<String>,
}

impl TripRequest {
    /// Whether the destination resolved to something usable for discovery
    #[must_use]
    pub fn destination_resolved(&self) -> bool {
        !self.destination.is_empty() && !self.destination.eq_ignore_ascii_case(UNKNOWN_DESTINATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_parse_defaults_to_moderate() {
        assert_eq!(TravelStyle::parse("luxury"), TravelStyle::Luxury);
        assert_eq!(TravelStyle::parse(" PACKED "), TravelStyle::Packed);
        assert_eq!(TravelStyle::parse("whatever"), TravelStyle::Moderate);
        assert_eq!(TravelStyle::parse(""), TravelStyle::Moderate);
    }

    #[test]
    fn test_activities_per_day_table() {
        assert_eq!(TravelStyle::Relaxed.activities_per_day(), 2);
        assert_eq!(TravelStyle::Luxury.activities_per_day(), 2);
        assert_eq!(TravelStyle::Moderate.activities_per_day(), 3);
        assert_eq!(TravelStyle::Budget.activities_per_day(), 3);
        assert_eq!(TravelStyle::Packed.activities_per_day(), 4);
        assert_eq!(TravelStyle::Adventure.activities_per_day(), 4);
    }

    #[test]
    fn test_style_serializes_lowercase() {
        let json = serde_json::to_string(&TravelStyle::Luxury).unwrap();
        assert_eq!(json, "\"luxury\"");
    }

    #[test]
    fn test_destination_resolved() {
        let mut request = TripRequest {
            destination: "Rome, Italy".to_string(),
            duration_days: 3,
            interests: vec!["history".to_string()],
            travel_style: TravelStyle::Moderate,
            special_requirements: vec![],
        };
        assert!(request.destination_resolved());

        request.destination = "Unknown".to_string();
        assert!(!request.destination_resolved());

        request.destination = String::new();
        assert!(!request.destination_resolved());
    }
}
