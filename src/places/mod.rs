//! Place discovery module
//!
//! This module provides place lookup and curation functionality:
//! - Lookup collaborator interface with an HTTP-backed implementation
//! - Fixture catalog used when no places API is configured
//! - Category derivation, fan-out discovery, deduplication and ranking
//! - Interest-based filtering with generic backfill

pub mod discovery;
pub mod filter;
pub mod fixtures;
pub mod lookup;

// Re-export commonly used types from submodules
pub use discovery::{PlaceDiscovery, DEFAULT_CATEGORIES};
pub use filter::filter_by_interest;
pub use fixtures::FixtureCatalog;
pub use lookup::{GooglePlacesClient, PlaceLookupService};
