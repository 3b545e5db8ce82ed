//! Place model for discoverable points of interest

use serde::{Deserialize, Serialize};

/// Geographic coordinates of a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A discoverable point of interest.
///
/// Places are value objects created per request by discovery and consumed
/// read-only downstream. Identity for deduplication is `(name, address)`;
/// `external_id` is provenance from the lookup collaborator only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub category: String,
    /// Rating in [0, 5] when the source reports one
    pub rating: Option<f32>,
    pub address: String,
    pub coordinates: Option<Coordinates>,
    pub description: String,
    pub external_id: String,
}

impl Place {
    /// Identity key used for deduplication
    #[must_use]
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.name, &self.address)
    }

    /// Rating used for ordering only; absent ratings sort as zero
    #[must_use]
    pub fn rating_for_ordering(&self) -> f32 {
        self.rating.unwrap_or(0.0)
    }
}
