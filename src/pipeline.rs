//! Trip planning pipeline
//!
//! Wires the three stages together: interpretation, place discovery and
//! itinerary synthesis. Each stage degrades independently; the only
//! condition surfaced to the caller as an error is an unresolvable
//! destination.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::interpret::RequestInterpreter;
use crate::itinerary::ItinerarySynthesizer;
use crate::llm::{GenerativeTextService, OpenAiChatClient};
use crate::models::{PlanStatus, TripPlan};
use crate::places::{FixtureCatalog, GooglePlacesClient, PlaceDiscovery, PlaceLookupService};

/// The full trip planning pipeline, shareable across requests
pub struct TripPlanner {
    interpreter: RequestInterpreter,
    discovery: PlaceDiscovery,
    synthesizer: ItinerarySynthesizer,
    generative_configured: bool,
    max_places: usize,
}

impl TripPlanner {
    /// Assemble a pipeline from explicit collaborators
    #[must_use]
    pub fn new(
        generative: Option<Arc<dyn GenerativeTextService>>,
        lookup: Arc<dyn PlaceLookupService>,
        radius_meters: u32,
        max_places: usize,
    ) -> Self {
        Self {
            interpreter: RequestInterpreter::new(generative.clone()),
            discovery: PlaceDiscovery::new(lookup, radius_meters),
            synthesizer: ItinerarySynthesizer::new(generative.clone()),
            generative_configured: generative.is_some(),
            max_places,
        }
    }

    /// Assemble a pipeline from configuration.
    ///
    /// Collaborators missing an API key are replaced by their fallbacks: no
    /// generative service at all, and the fixture catalog for places.
    #[must_use]
    pub fn from_config(config: &PlannerConfig) -> Self {
        let generative: Option<Arc<dyn GenerativeTextService>> =
            OpenAiChatClient::from_config(&config.generative)
                .map(|client| Arc::new(client) as Arc<dyn GenerativeTextService>);

        let lookup: Arc<dyn PlaceLookupService> =
            match GooglePlacesClient::from_config(&config.places) {
                Some(client) => Arc::new(client),
                None => Arc::new(FixtureCatalog::new()),
            };

        Self::new(
            generative,
            lookup,
            config.defaults.search_radius_km * 1000,
            config.defaults.max_places as usize,
        )
    }

    /// Whether a generative collaborator is configured
    #[must_use]
    pub fn generative_configured(&self) -> bool {
        self.generative_configured
    }

    /// Plan a trip from free text.
    ///
    /// Total: collaborator failures degrade to fallback paths and still
    /// produce a success outcome. Only an unresolvable destination yields
    /// `status = error`, with an explanatory message and no places.
    pub async fn plan_trip(&self, text: &str) -> TripPlan {
        info!("planning trip from request text ({} chars)", text.len());

        let request = self.interpreter.interpret(text).await;
        info!(
            destination = %request.destination,
            duration_days = request.duration_days,
            "interpreted request"
        );

        if !request.destination_resolved() {
            return TripPlan::error(
                PlannerError::DestinationUnresolved.user_message(),
                Some(request),
            );
        }

        let places = self
            .discovery
            .recommendations(&request.destination, &request.interests, self.max_places)
            .await;

        let itinerary = self
            .synthesizer
            .synthesize(
                &request.destination,
                request.duration_days,
                &places,
                &request.interests,
                request.travel_style,
            )
            .await;

        info!(
            "planned {}-day trip to {} with {} places",
            request.duration_days,
            request.destination,
            places.len()
        );

        TripPlan {
            itinerary,
            places,
            status: PlanStatus::Success,
            request: Some(request),
            generated_at: Utc::now(),
        }
    }
}
