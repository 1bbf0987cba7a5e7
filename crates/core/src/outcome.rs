use serde::{Deserialize, Serialize};

/// Body returned with every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorOutcome {
    /// Machine-readable error kind, e.g. `bad_gateway`
    pub error: String,
    /// Human-readable description
    pub message: String,
}

impl ErrorOutcome {
    pub fn new(error: &str, message: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
        }
    }

    /// The blockchain node could not be reached or answered badly
    pub fn bad_gateway(message: &str) -> Self {
        Self::new("bad_gateway", message)
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("not_found", message)
    }

    pub fn invalid(message: &str) -> Self {
        Self::new("invalid", message)
    }

    pub fn throttled(message: &str) -> Self {
        Self::new("throttled", message)
    }
}
