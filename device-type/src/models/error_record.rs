use serde::{Deserialize, Serialize};

/// Failure reported for a call that reached, or tried to reach, the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// Absent when no response was received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Transport error, `null` when the platform did reply.
    pub error: Option<String>,
    /// Raw response body, empty when no response was received.
    pub body: String,
}
