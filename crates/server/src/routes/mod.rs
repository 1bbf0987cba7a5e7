pub mod claims;
pub mod health;
pub mod metrics;

use axum::{Router, routing::get};

use crate::node::NodeClient;

/// Build claim map routes
pub fn claim_routes() -> Router<NodeClient> {
    Router::new()
        .route("/claims", get(claims::list))
        .route("/claims/{id}", get(claims::read))
}
