//! Claim map HTTP handlers

use axum::{
    Json,
    extract::{Path, State},
};
use claim_map_core::{Feature, FeatureCollection, to_feature, to_feature_collection};

use crate::error::AppError;
use crate::node::NodeClient;

/// GET /claims - Every claim on the node as a GeoJSON FeatureCollection
///
/// Fetches the node's claim list once per request and translates it in
/// upstream order. Node failures become 502 responses.
pub async fn list(State(node): State<NodeClient>) -> Result<Json<FeatureCollection>, AppError> {
    let claims = node.list_claims().await?;
    let collection = to_feature_collection(&claims);

    tracing::info!(features = collection.features.len(), "Served claim map");
    Ok(Json(collection))
}

/// GET /claims/{id} - A single claim as a GeoJSON Feature
pub async fn read(
    State(node): State<NodeClient>,
    Path(id): Path<String>,
) -> Result<Json<Feature>, AppError> {
    let id: u64 = id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid claim id '{}'", id)))?;

    match node.get_claim(id).await? {
        Some(claim) => Ok(Json(to_feature(&claim))),
        None => Err(AppError::NotFound(format!("Claim {} not found", id))),
    }
}
