//! Request interpretation
//!
//! Turns free text into a [`TripRequest`]. When a generative text service is
//! configured it is asked for a strict JSON extraction; any transport or
//! parse failure discards the generative result entirely and the keyword
//! classifier answers instead. The operation is total and never fails.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::classify;
use crate::llm::GenerativeTextService;
use crate::models::{TravelStyle, TripRequest};
use crate::Result;
use crate::error::PlannerError;

const EXTRACTION_TEMPERATURE: f32 = 0.1;
const EXTRACTION_MAX_TOKENS: u32 = 300;

const EXTRACTION_SYSTEM_PROMPT: &str = r#"You are an expert travel request parser. Extract the following information from the user's travel request and return ONLY a valid JSON object.

Required fields:
- destination: The main destination (city, country, or region)
- duration: Number of days (if not specified, use 7)
- interests: Array of interests/activities mentioned
- travel_style: One of: "budget", "moderate", "luxury", "relaxed", "packed", "adventure"
- special_requirements: Array of any special needs mentioned

Common interests include: food, history, nature, art, technology, adventure, relaxation, nightlife, shopping, culture, architecture, music, sports, photography, wildlife, beaches, mountains, museums, festivals, local_life

Examples:
Input: "I want a 5-day trip to Rome with history and food"
Output: {"destination": "Rome, Italy", "duration": 5, "interests": ["history", "food"], "travel_style": "moderate", "special_requirements": []}

Input: "Planning a relaxing week in Bali with beaches and spa"
Output: {"destination": "Bali, Indonesia", "duration": 7, "interests": ["relaxation", "beaches", "spa"], "travel_style": "relaxed", "special_requirements": []}

Return ONLY the JSON object, no other text."#;

/// Interprets free-text travel requests, preferring the generative service
pub struct RequestInterpreter {
    generative: Option<Arc<dyn GenerativeTextService>>,
}

impl RequestInterpreter {
    #[must_use]
    pub fn new(generative: Option<Arc<dyn GenerativeTextService>>) -> Self {
        Self { generative }
    }

    /// Interpret a travel request. Total: always returns a usable structure.
    pub async fn interpret(&self, text: &str) -> TripRequest {
        if let Some(service) = &self.generative {
            match generative_extract(service.as_ref(), text).await {
                Ok(request) => {
                    debug!(destination = %request.destination, "generative extraction succeeded");
                    return request;
                }
                Err(e) => {
                    warn!("generative extraction failed ({e}), using keyword classifier");
                }
            }
        }

        classify::classify(text)
    }
}

/// Ask the generative service for a structured extraction and coerce the
/// reply. Errors here mean the whole generative result is discarded; the
/// caller never merges a broken response.
async fn generative_extract(
    service: &dyn GenerativeTextService,
    text: &str,
) -> Result<TripRequest> {
    let user_prompt = format!("Parse this travel request: {text}");
    let reply = service
        .complete(
            EXTRACTION_SYSTEM_PROMPT,
            &user_prompt,
            EXTRACTION_TEMPERATURE,
            EXTRACTION_MAX_TOKENS,
        )
        .await?;

    let value = parse_reply(&reply)?;
    Ok(coerce_request(&value, text))
}

/// Parse the reply as JSON, repairing replies that wrap the object in prose
/// by extracting the first balanced `{...}` span.
fn parse_reply(reply: &str) -> Result<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(reply) {
        if value.is_object() {
            return Ok(value);
        }
    }

    let span = first_json_object(reply)
        .ok_or_else(|| PlannerError::parse("no JSON object found in reply"))?;
    serde_json::from_str::<Value>(span)
        .map_err(|e| PlannerError::parse(format!("unparseable JSON object in reply: {e}")))
}

/// Locate the first balanced `{...}` span in the text
fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;

    for (offset, c) in text[start..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Coerce a parsed extraction into a valid request. Only the destination is
/// ever replaced from the classifier; the rest of the generative result is
/// kept as-is.
fn coerce_request(value: &Value, request_text: &str) -> TripRequest {
    let mut destination = value
        .get("destination")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string();

    if destination.is_empty() || destination.eq_ignore_ascii_case("unknown") {
        destination = classify::extract_destination(request_text);
    }

    let duration_days = coerce_duration(value.get("duration"));

    let mut interests: Vec<String> = value
        .get("interests")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|interest| interest.trim().to_lowercase())
                .filter(|interest| !interest.is_empty())
                .collect()
        })
        .unwrap_or_default();
    if interests.is_empty() {
        interests.push(classify::GENERAL_INTEREST.to_string());
    }

    let travel_style = value
        .get("travel_style")
        .and_then(Value::as_str)
        .map_or(TravelStyle::Moderate, TravelStyle::parse);

    let special_requirements: Vec<String> = value
        .get("special_requirements")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|requirement| requirement.trim().to_string())
                .filter(|requirement| !requirement.is_empty())
                .collect()
        })
        .unwrap_or_default();

    TripRequest {
        destination,
        duration_days,
        interests,
        travel_style,
        special_requirements,
    }
}

/// Coerce a duration value to a positive day count, defaulting to 7
fn coerce_duration(value: Option<&Value>) -> u32 {
    let days = match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    };

    if days >= 1 {
        u32::try_from(days).unwrap_or(u32::MAX)
    } else {
        classify::DEFAULT_DURATION_DAYS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    /// Generative stub that always replies with the same text
    struct CannedReply(String);

    #[async_trait]
    impl GenerativeTextService for CannedReply {
        async fn complete(&self, _: &str, _: &str, _: f32, _: u32) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    /// Generative stub that always fails
    struct AlwaysDown;

    #[async_trait]
    impl GenerativeTextService for AlwaysDown {
        async fn complete(&self, _: &str, _: &str, _: f32, _: u32) -> Result<String> {
            Err(PlannerError::unavailable("stubbed outage"))
        }
    }

    fn interpreter_with(service: impl GenerativeTextService + 'static) -> RequestInterpreter {
        RequestInterpreter::new(Some(Arc::new(service)))
    }

    #[tokio::test]
    async fn test_without_generative_service_uses_classifier() {
        let interpreter = RequestInterpreter::new(None);
        let request = interpreter.interpret("a 3-day trip to Rome with food").await;
        assert_eq!(request.destination, "Rome, Italy");
        assert_eq!(request.duration_days, 3);
    }

    #[tokio::test]
    async fn test_generative_reply_is_used() {
        let reply = json!({
            "destination": "Kyoto, Japan",
            "duration": 4,
            "interests": ["History", " food "],
            "travel_style": "RELAXED",
            "special_requirements": ["vegetarian meals"]
        });
        let interpreter = interpreter_with(CannedReply(reply.to_string()));

        let request = interpreter.interpret("anything").await;
        assert_eq!(request.destination, "Kyoto, Japan");
        assert_eq!(request.duration_days, 4);
        assert_eq!(request.interests, vec!["history", "food"]);
        assert_eq!(request.travel_style, TravelStyle::Relaxed);
        assert_eq!(request.special_requirements, vec!["vegetarian meals"]);
    }

    #[tokio::test]
    async fn test_reply_wrapped_in_prose_is_repaired() {
        let reply = format!(
            "Sure! Here is the extraction:\n{}\nLet me know if you need more.",
            json!({"destination": "Oslo, Norway", "duration": 2, "interests": ["nature"]})
        );
        let interpreter = interpreter_with(CannedReply(reply));

        let request = interpreter.interpret("anything").await;
        assert_eq!(request.destination, "Oslo, Norway");
        assert_eq!(request.duration_days, 2);
    }

    #[tokio::test]
    async fn test_garbage_reply_falls_back_entirely() {
        let interpreter = interpreter_with(CannedReply("no json here at all".to_string()));

        let request = interpreter
            .interpret("a 5-day luxury trip to Paris with art")
            .await;
        // Classifier output, not a partial merge of the broken reply
        assert_eq!(request.destination, "Paris, France");
        assert_eq!(request.duration_days, 5);
        assert_eq!(request.travel_style, TravelStyle::Luxury);
    }

    #[tokio::test]
    async fn test_service_outage_falls_back() {
        let interpreter = interpreter_with(AlwaysDown);
        let request = interpreter.interpret("2 weeks in Thailand").await;
        assert_eq!(request.destination, "Thailand");
        assert_eq!(request.duration_days, 14);
    }

    #[tokio::test]
    async fn test_unknown_destination_is_replaced_only() {
        let reply = json!({
            "destination": "Unknown",
            "duration": 6,
            "interests": ["shopping"],
            "travel_style": "packed"
        });
        let interpreter = interpreter_with(CannedReply(reply.to_string()));

        let request = interpreter.interpret("shopping spree in Tokyo").await;
        // Destination comes from the classifier, everything else is kept
        assert_eq!(request.destination, "Tokyo, Japan");
        assert_eq!(request.duration_days, 6);
        assert_eq!(request.interests, vec!["shopping"]);
        assert_eq!(request.travel_style, TravelStyle::Packed);
    }

    #[test]
    fn test_coerce_duration() {
        assert_eq!(coerce_duration(Some(&json!(5))), 5);
        assert_eq!(coerce_duration(Some(&json!(4.0))), 4);
        assert_eq!(coerce_duration(Some(&json!("12"))), 12);
        assert_eq!(coerce_duration(Some(&json!("soon"))), 7);
        assert_eq!(coerce_duration(Some(&json!(0))), 7);
        assert_eq!(coerce_duration(Some(&json!(null))), 7);
        assert_eq!(coerce_duration(None), 7);
    }

    #[test]
    fn test_empty_interests_default_to_general() {
        let value = json!({"destination": "Rome, Italy", "interests": []});
        let request = coerce_request(&value, "whatever");
        assert_eq!(request.interests, vec!["general"]);
    }

    #[test]
    fn test_first_json_object_spans() {
        assert_eq!(first_json_object(r#"x {"a": {"b": 1}} y"#), Some(r#"{"a": {"b": 1}}"#));
        assert_eq!(first_json_object("no braces"), None);
        assert_eq!(first_json_object("{never closed"), None);
    }
}
