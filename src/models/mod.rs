//! Data models for the TripWeaver application
//!
//! This module contains the core domain models organized by concern:
//! - Request: Structured trip parameters extracted from free text
//! - Place: Discoverable points of interest with ratings and metadata
//! - Plan: Day plans and the final trip plan returned to callers

pub mod place;
pub mod plan;
pub mod request;

// Re-export all public types for convenient access
pub use place::{Coordinates, Place};
pub use plan::{AfternoonSlot, DayPlan, PlanStatus, TripPlan};
pub use request::{TravelStyle, TripRequest};
