use serde::{Deserialize, Serialize};

use crate::models::device_type::REQUIRED_PARAMS;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsConfig {
    /// Names that must be present in every invocation.
    ///
    /// Default: `["apiKey", "authToken", "orgId", "typeId"]`
    pub required: Vec<String>,
}

impl Default for ParamsConfig {
    fn default() -> Self {
        Self {
            required: REQUIRED_PARAMS.iter().map(|&name| name.to_owned()).collect(),
        }
    }
}
