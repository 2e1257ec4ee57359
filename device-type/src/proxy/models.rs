use serde::{Deserialize, Serialize};

use crate::params::InvocationInput;

/// Payload of `POST /run`.
#[derive(Debug, Deserialize)]
pub struct RunRequest {
    /// Invocation parameters.
    #[serde(default)]
    pub value: InvocationInput,
    #[serde(default)]
    pub activation_id: Option<String>,
    #[serde(default)]
    pub action_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InitResponse {
    pub ok: bool,
}
