//! Network messages - communication between App and Network layers

use crate::error::ExecuteError;
use crate::models::{RequestSpec, ResponseSummary};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Execute a validated request
    ExecuteRequest { id: u64, spec: RequestSpec },
    /// Cancel a pending request
    CancelRequest(u64),
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// A response was received, whatever its status code
    Completed { id: u64, summary: ResponseSummary },
    /// No response could be obtained
    Failed { id: u64, error: ExecuteError },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Completed { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
        }
    }
}
