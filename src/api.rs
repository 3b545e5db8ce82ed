use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    response::Json,
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::VERSION;
use crate::models::TripPlan;
use crate::pipeline::TripPlanner;

#[derive(Debug, Deserialize)]
pub struct PlanTripRequest {
    pub message: String,
}

pub fn router(planner: Arc<TripPlanner>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/plan-trip", post(plan_trip))
        .with_state(planner)
}

async fn plan_trip(
    State(planner): State<Arc<TripPlanner>>,
    Json(payload): Json<PlanTripRequest>,
) -> Json<TripPlan> {
    // Total: interpretation turns unusable input into a destination-
    // unresolved error response rather than a transport failure
    Json(planner.plan_trip(&payload.message).await)
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "TripWeaver API is running",
        "endpoints": {
            "plan_trip": "POST /plan-trip - Plan a complete trip",
            "health": "GET /health - Check API health",
        },
    }))
}

async fn health(State(planner): State<Arc<TripPlanner>>) -> Json<Value> {
    let generative_service = if planner.generative_configured() {
        "configured"
    } else {
        "not configured"
    };

    Json(json!({
        "status": "healthy",
        "generative_service": generative_service,
        "version": VERSION,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::places::FixtureCatalog;

    fn test_planner() -> Arc<TripPlanner> {
        Arc::new(TripPlanner::new(
            None,
            Arc::new(FixtureCatalog::new()),
            50_000,
            15,
        ))
    }

    #[tokio::test]
    async fn test_plan_trip_handler() {
        let response = plan_trip(
            State(test_planner()),
            Json(PlanTripRequest {
                message: "3 days in Rome with history".to_string(),
            }),
        )
        .await;

        assert_eq!(response.0.status, crate::models::PlanStatus::Success);
        assert!(!response.0.itinerary.is_empty());
    }

    #[tokio::test]
    async fn test_plan_trip_handler_empty_message() {
        let response = plan_trip(
            State(test_planner()),
            Json(PlanTripRequest {
                message: String::new(),
            }),
        )
        .await;

        // Degrades to an error outcome, never a transport failure
        assert_eq!(response.0.status, crate::models::PlanStatus::Error);
        assert!(response.0.places.is_empty());
    }

    #[tokio::test]
    async fn test_health_reports_generative_state() {
        let response = health(State(test_planner())).await;
        assert_eq!(response.0["status"], "healthy");
        assert_eq!(response.0["generative_service"], "not configured");
    }
}
