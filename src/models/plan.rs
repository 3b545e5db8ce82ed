//! Day plan and trip plan models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::place::Place;
use super::request::TripRequest;

/// Outcome status reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Success,
    Error,
}

/// Afternoon slot of a day plan.
///
/// The afternoon either visits a second place, keeps exploring the morning
/// area when only one place was scheduled, or stays free.
#[derive(Debug, Clone, PartialEq)]
pub enum AfternoonSlot {
    Visit(Place),
    ContinueMorning(String),
    FreeTime,
}

/// Structured plan for a single day, rendered to text as a final step
#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan {
    pub day: u32,
    pub morning: Option<Place>,
    pub lunch: Option<Place>,
    pub afternoon: AfternoonSlot,
    pub evening: Option<Place>,
}

/// Final trip plan returned by the pipeline
#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub itinerary: String,
    pub places: Vec<Place>,
    pub status: PlanStatus,
    pub request: Option<TripRequest>,
    pub generated_at: DateTime<Utc>,
}

impl TripPlan {
    /// Build an error outcome carrying a user-facing explanation
    #[must_use]
    pub fn error<S: Into<String>>(message: S, request: Option<TripRequest>) -> Self {
        Self {
            itinerary: message.into(),
            places: Vec::new(),
            status: PlanStatus::Error,
            request,
            generated_at: Utc::now(),
        }
    }
}
