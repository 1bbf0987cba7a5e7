//! claim-map-core: Claim record types and GeoJSON translation
//!
//! This crate turns claim records served by the blockchain node's REST API
//! into GeoJSON features for the map frontend. It performs no I/O.

pub mod claim;
pub mod coordinates;
pub mod feature;
pub mod outcome;

// Re-export geojson types used in our public API
pub use geojson::{Feature, FeatureCollection};

// Re-export our types
pub use claim::{ClaimEnvelope, ClaimList, ClaimRecord};
pub use coordinates::{Position, normalize, parse_degrees};
pub use feature::{ClaimProperties, to_feature, to_feature_collection};
pub use outcome::ErrorOutcome;
