//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request to execute a natural-language command.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandRequest {
    /// The command the user wants executed
    pub msg: String,
}

/// Response after executing a command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    /// The result or output of executing the command
    pub msg: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
