use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Placeholder substituted with the organization id in [`PlatformConfig::endpoint`].
pub const ORG_ID_PLACEHOLDER: &str = "{orgId}";

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Base URL of the platform API.
    ///
    /// Default: `https://{orgId}.internetofthings.ibmcloud.com:443/api/v0002`
    pub endpoint: String,

    /// Timeout of a single platform call, connect included.
    ///
    /// Default: `30s`
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://{orgId}.internetofthings.ibmcloud.com:443/api/v0002".to_owned(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl PlatformConfig {
    /// Checks that the endpoint template yields a valid URL.
    pub fn validate(&self) -> anyhow::Result<()> {
        let sample = self.endpoint.replace(ORG_ID_PLACEHOLDER, "org");
        url::Url::parse(&sample)
            .with_context(|| format!("invalid platform endpoint `{}`", self.endpoint))?;
        anyhow::ensure!(
            !self.request_timeout.is_zero(),
            "platform request timeout must be positive"
        );
        Ok(())
    }
}
