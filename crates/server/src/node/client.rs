//! Client for the node's `reality` module REST queries

use std::time::Duration;

use claim_map_core::{ClaimEnvelope, ClaimList, ClaimRecord};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Path of the claim list query, relative to the node base URL
pub const CLAIMS_PATH: &str = "/contactical/reality/v1/claim";

/// Longest upstream error body kept in an error message
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("http status {status} body={body}")]
    HttpStatus { status: u16, body: String },
    #[error("decode error: {0}")]
    Decode(String),
}

impl NodeError {
    /// Description safe to return to API clients; upstream bodies and
    /// transport details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            NodeError::Client(_) => "Blockchain node client is misconfigured".to_string(),
            NodeError::Network(_) => "Blockchain node is unreachable".to_string(),
            NodeError::HttpStatus { status, .. } => {
                format!("Blockchain node answered with status {}", status)
            }
            NodeError::Decode(_) => "Blockchain node sent an unreadable response".to_string(),
        }
    }
}

/// Client for the blockchain node's REST API
#[derive(Clone)]
pub struct NodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl NodeClient {
    /// Create a client for the node at `base_url`, bounding each request by `timeout`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, NodeError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NodeError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /contactical/reality/v1/claim - all claims, in node order
    pub async fn list_claims(&self) -> Result<Vec<ClaimRecord>, NodeError> {
        let url = format!("{}{}", self.base_url, CLAIMS_PATH);
        let list: ClaimList = self.get_json("list_claims", &url, &[]).await?;

        tracing::debug!(count = list.claim.len(), "Fetched claims from node");
        Ok(list.claim)
    }

    /// GET /contactical/reality/v1/claim/{id} - one claim, `None` if unknown
    pub async fn get_claim(&self, id: u64) -> Result<Option<ClaimRecord>, NodeError> {
        let url = format!("{}{}/{}", self.base_url, CLAIMS_PATH, id);

        match self.get_json::<ClaimEnvelope>("get_claim", &url, &[]).await {
            Ok(envelope) => Ok(Some(envelope.claim)),
            Err(NodeError::HttpStatus { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Cheapest query that proves the node answers claim requests
    pub async fn ping(&self) -> Result<(), NodeError> {
        let url = format!("{}{}", self.base_url, CLAIMS_PATH);
        self.get_json::<ClaimList>("ping", &url, &[("pagination.limit", "1")])
            .await
            .map(|_| ())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        op: &'static str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, NodeError> {
        let response = match self.http.get(url).query(query).send().await {
            Ok(response) => response,
            Err(e) => {
                metrics::counter!(
                    "upstream_requests_total",
                    "operation" => op,
                    "status" => "error"
                )
                .increment(1);
                tracing::warn!(operation = op, error = %e, "Node request failed");
                return Err(NodeError::Network(e.to_string()));
            }
        };

        let status = response.status();
        metrics::counter!(
            "upstream_requests_total",
            "operation" => op,
            "status" => status.as_u16().to_string()
        )
        .increment(1);

        if status != StatusCode::OK {
            let body = truncate(response.text().await.unwrap_or_default());
            tracing::error!(
                operation = op,
                status = status.as_u16(),
                body = %body,
                "Node answered with an error status"
            );
            return Err(NodeError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| NodeError::Decode(e.to_string()))
    }
}

fn truncate(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }
    body
}
