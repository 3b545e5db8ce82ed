//! `TripWeaver` - natural-language travel itinerary planning
//!
//! This library turns free-text travel requests into day-by-day itineraries
//! through a three-stage pipeline: request interpretation, place discovery
//! and itinerary synthesis. Every stage prefers a configured collaborator
//! and degrades to a deterministic fallback on any failure.

pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod interpret;
pub mod itinerary;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod places;
pub mod web;

// Re-export core types for public API
pub use classify::classify;
pub use config::PlannerConfig;
pub use error::PlannerError;
pub use interpret::RequestInterpreter;
pub use itinerary::ItinerarySynthesizer;
pub use llm::{GenerativeTextService, OpenAiChatClient};
pub use models::{Coordinates, Place, PlanStatus, TravelStyle, TripPlan, TripRequest};
pub use pipeline::TripPlanner;
pub use places::{FixtureCatalog, GooglePlacesClient, PlaceDiscovery, PlaceLookupService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
