//! Itinerary synthesis
//!
//! Terminal pipeline stage: turns a destination, duration and place set
//! into the final day-by-day document. Prefers the generative service with
//! a structured prompt; degrades to fully deterministic construction when
//! the service is absent, fails, or answers implausibly briefly. Never
//! fails to the caller.

pub mod fallback;
pub mod prompt;

use std::sync::Arc;
use tracing::{debug, warn};

use crate::llm::GenerativeTextService;
use crate::models::{Place, TravelStyle};
use crate::Result;

pub use fallback::{build_itinerary, plan_days, tips_block};

/// Generated documents shorter than this are padded, not trusted as-is
pub const MIN_GENERATED_LENGTH: usize = 500;

const SYNTHESIS_TEMPERATURE: f32 = 0.7;
const SYNTHESIS_MAX_TOKENS: u32 = 3000;

/// Itinerary synthesizer over an optional generative collaborator
pub struct ItinerarySynthesizer {
    generative: Option<Arc<dyn GenerativeTextService>>,
}

impl ItinerarySynthesizer {
    #[must_use]
    pub fn new(generative: Option<Arc<dyn GenerativeTextService>>) -> Self {
        Self { generative }
    }

    /// Produce an itinerary document. Always returns a non-empty string.
    pub async fn synthesize(
        &self,
        destination: &str,
        duration_days: u32,
        places: &[Place],
        interests: &[String],
        travel_style: TravelStyle,
    ) -> String {
        let destination =
            if destination.is_empty() || destination.eq_ignore_ascii_case("unknown") {
                "your destination"
            } else {
                destination
            };
        let duration_days = if duration_days == 0 { 7 } else { duration_days };
        let interests: Vec<String> = if interests.is_empty() {
            vec!["general".to_string()]
        } else {
            interests.to_vec()
        };

        if let Some(service) = &self.generative {
            match generate(
                service.as_ref(),
                destination,
                duration_days,
                places,
                &interests,
                travel_style,
            )
            .await
            {
                Ok(document) => return document,
                Err(e) => {
                    warn!("generative synthesis failed ({e}), building deterministic itinerary");
                }
            }
        }

        fallback::build_itinerary(destination, duration_days, places, &interests, travel_style)
    }
}

async fn generate(
    service: &dyn GenerativeTextService,
    destination: &str,
    duration_days: u32,
    places: &[Place],
    interests: &[String],
    travel_style: TravelStyle,
) -> Result<String> {
    let system_prompt =
        prompt::build_system_prompt(destination, duration_days, places, interests, travel_style);
    let user_prompt = prompt::build_user_prompt(destination, duration_days, interests, travel_style);

    let document = service
        .complete(
            &system_prompt,
            &user_prompt,
            SYNTHESIS_TEMPERATURE,
            SYNTHESIS_MAX_TOKENS,
        )
        .await?;

    if document.len() < MIN_GENERATED_LENGTH {
        debug!(
            "generated document is only {} chars, padding with tips",
            document.len()
        );
        return Ok(prompt::pad_short_document(
            &document,
            destination,
            duration_days,
            interests,
        ));
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use async_trait::async_trait;

    struct CannedReply(String);

    #[async_trait]
    impl GenerativeTextService for CannedReply {
        async fn complete(&self, _: &str, _: &str, _: f32, _: u32) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct AlwaysDown;

    #[async_trait]
    impl GenerativeTextService for AlwaysDown {
        async fn complete(&self, _: &str, _: &str, _: f32, _: u32) -> Result<String> {
            Err(PlannerError::timeout("stubbed timeout"))
        }
    }

    fn sample_places() -> Vec<Place> {
        (0..6)
            .map(|i| Place {
                name: format!("Spot {i}"),
                category: "tourist_attraction".to_string(),
                rating: Some(4.0),
                address: "Rome, Italy".to_string(),
                coordinates: None,
                description: String::new(),
                external_id: String::new(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_without_service_builds_deterministic_itinerary() {
        let synthesizer = ItinerarySynthesizer::new(None);
        let doc = synthesizer
            .synthesize(
                "Rome, Italy",
                2,
                &sample_places(),
                &["history".to_string()],
                TravelStyle::Moderate,
            )
            .await;
        assert_eq!(doc.matches("## Day ").count(), 2);
    }

    #[tokio::test]
    async fn test_long_generated_document_is_returned_verbatim() {
        let long_doc = "## Day 1\n".repeat(100);
        let synthesizer = ItinerarySynthesizer::new(Some(Arc::new(CannedReply(long_doc.clone()))));
        let doc = synthesizer
            .synthesize(
                "Rome, Italy",
                2,
                &sample_places(),
                &["history".to_string()],
                TravelStyle::Moderate,
            )
            .await;
        assert_eq!(doc, long_doc);
    }

    #[tokio::test]
    async fn test_short_generated_document_is_padded() {
        let synthesizer =
            ItinerarySynthesizer::new(Some(Arc::new(CannedReply("Go see things.".to_string()))));
        let doc = synthesizer
            .synthesize(
                "Rome, Italy",
                2,
                &sample_places(),
                &["food".to_string()],
                TravelStyle::Moderate,
            )
            .await;
        assert!(doc.contains("Go see things."));
        assert!(doc.contains("General Travel Tips"));
        assert!(doc.len() >= MIN_GENERATED_LENGTH);
    }

    #[tokio::test]
    async fn test_service_failure_falls_back() {
        let synthesizer = ItinerarySynthesizer::new(Some(Arc::new(AlwaysDown)));
        let doc = synthesizer
            .synthesize(
                "Rome, Italy",
                3,
                &sample_places(),
                &["history".to_string()],
                TravelStyle::Moderate,
            )
            .await;
        assert_eq!(doc.matches("## Day ").count(), 3);
    }

    #[tokio::test]
    async fn test_input_normalization() {
        let synthesizer = ItinerarySynthesizer::new(None);
        let doc = synthesizer
            .synthesize("Unknown", 0, &[], &[], TravelStyle::Moderate)
            .await;
        assert!(doc.contains("your destination"));
        assert!(doc.contains("general"));
        assert!(!doc.is_empty());
    }
}
