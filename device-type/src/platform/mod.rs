use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub use self::config::{ORG_ID_PLACEHOLDER, PlatformConfig};
use crate::error::ActionError;
use crate::models::device_type::DeviceTypeRequest;
use crate::params::{InvocationInput, MissingParams, text_param};

mod config;

/// Caller-supplied credentials of one invocation.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    pub org_id: String,
    pub api_key: String,
    pub auth_token: String,
}

impl Credentials {
    /// Parameters the platform call cannot be made without.
    pub const PARAMS: [&'static str; 3] = ["apiKey", "authToken", "orgId"];

    pub fn from_input(input: &InvocationInput) -> Result<Self, MissingParams> {
        let [api_key, auth_token, org_id] = Self::PARAMS.map(|name| text_param(input, name));

        match (api_key, auth_token, org_id) {
            (Some(api_key), Some(auth_token), Some(org_id)) => Ok(Self {
                org_id,
                api_key,
                auth_token,
            }),
            _ => Err(MissingParams(
                Self::PARAMS
                    .iter()
                    .filter(|name| !input.contains_key(**name))
                    .map(|&name| name.to_owned())
                    .collect(),
            )),
        }
    }

    /// `Authorization` header value for HTTP Basic auth.
    pub fn authorization(&self) -> String {
        let mut pair = format!("{}:{}", self.api_key, self.auth_token);
        let header = format!("Basic {}", STANDARD.encode(pair.as_bytes()));
        pair.zeroize();
        header
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("org_id", &self.org_id)
            .field("api_key", &"***")
            .field("auth_token", &"***")
            .finish()
    }
}

#[derive(Clone)]
pub struct PlatformClient {
    http: reqwest::Client,
    config: PlatformConfig,
}

impl PlatformClient {
    pub fn new(config: PlatformConfig) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_http_client(http, config))
    }

    pub fn with_http_client(http: reqwest::Client, config: PlatformConfig) -> Self {
        Self { http, config }
    }

    pub fn device_types_url(&self, org_id: &str) -> String {
        let base = self.config.endpoint.replace(ORG_ID_PLACEHOLDER, org_id);
        format!("{}/device/types", base.trim_end_matches('/'))
    }

    /// Registers a device type. Succeeds only on `201 Created` with a JSON body.
    pub async fn create_device_type(
        &self,
        credentials: &Credentials,
        request: &DeviceTypeRequest,
    ) -> Result<Value, ActionError> {
        let url = self.device_types_url(&credentials.org_id);
        tracing::info!(
            org_id = %credentials.org_id,
            device_type = ?request.id,
            "registering device type"
        );

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, credentials.authorization())
            .json(request)
            .send()
            .await
            .inspect_err(|e| tracing::warn!(%url, "platform request failed: {e}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ActionError::ResponseBody { status, source })?;

        if status != StatusCode::CREATED {
            tracing::warn!(%status, "platform rejected device type");
            return Err(ActionError::Upstream { status, body });
        }

        match serde_json::from_str(&body) {
            Ok(value) => {
                tracing::info!("device type created");
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(%status, "platform replied with a malformed body: {e}");
                Err(ActionError::Upstream { status, body })
            }
        }
    }
}
