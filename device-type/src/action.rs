use serde_json::{Value, json};

use crate::config::AppConfig;
use crate::error::ActionError;
use crate::models::device_type::{DeviceTypeRequest, OPTIONAL_PARAMS};
use crate::params::{InvocationInput, ParamSchema};
use crate::platform::{Credentials, PlatformClient};

/// Validates the invocation, then makes the single registration call.
#[derive(Clone)]
pub struct CreateDeviceType {
    schema: ParamSchema,
    platform: PlatformClient,
}

impl CreateDeviceType {
    pub fn new(schema: ParamSchema, platform: PlatformClient) -> Self {
        Self { schema, platform }
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        config.platform.validate()?;

        let schema = ParamSchema::from_config(&config.params).with_optional(OPTIONAL_PARAMS);
        for name in Credentials::PARAMS {
            if !schema.required().iter().any(|required| required == name) {
                tracing::warn!(param = name, "platform credential is not a required parameter");
            }
        }

        let platform = PlatformClient::new(config.platform.clone())?;
        Ok(Self::new(schema, platform))
    }

    pub async fn invoke(&self, input: &InvocationInput) -> Result<Value, ActionError> {
        if let Err(missing) = self.schema.check(input) {
            tracing::error!("{missing}");
            return Err(missing.into());
        }

        let credentials = Credentials::from_input(input)?;
        let request = DeviceTypeRequest::from_input(input);
        self.platform.create_device_type(&credentials, &request).await
    }
}

/// Shapes an outcome the way action hosts expect it: the success value as is,
/// a failure wrapped as `{"error": ...}`.
pub fn to_action_result(result: &Result<Value, ActionError>) -> Value {
    match result {
        Ok(value) => value.clone(),
        Err(e) => json!({ "error": e.to_payload() }),
    }
}
