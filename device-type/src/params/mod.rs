use serde_json::{Map, Value};
use thiserror::Error;

pub use self::config::ParamsConfig;

mod config;

/// Parameters of a single invocation, keyed by name.
pub type InvocationInput = Map<String, Value>;

/// Required parameter names absent from an invocation, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required parameters: {}", .0.join(","))]
pub struct MissingParams(pub Vec<String>);

impl MissingParams {
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

/// Declarative list of the parameters an action accepts.
#[derive(Debug, Clone, Default)]
pub struct ParamSchema {
    required: Vec<String>,
    optional: Vec<String>,
}

impl ParamSchema {
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
            optional: Vec::new(),
        }
    }

    pub fn with_optional<I, S>(mut self, optional: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional = optional.into_iter().map(Into::into).collect();
        self
    }

    pub fn from_config(config: &ParamsConfig) -> Self {
        Self::new(config.required.iter().cloned())
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Returns every required name that is not a key of `input`.
    ///
    /// A key holding JSON `null` counts as present.
    pub fn missing(&self, input: &InvocationInput) -> Vec<String> {
        self.required
            .iter()
            .filter(|name| {
                let present = input.contains_key(name.as_str());
                tracing::debug!(param = %name, present, "checked required parameter");
                !present
            })
            .cloned()
            .collect()
    }

    pub fn check(&self, input: &InvocationInput) -> Result<(), MissingParams> {
        if !self.optional.is_empty() {
            for key in input.keys() {
                if !self.is_known(key) {
                    tracing::debug!(param = %key, "ignoring unknown parameter");
                }
            }
        }

        let missing = self.missing(input);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MissingParams(missing))
        }
    }

    fn is_known(&self, name: &str) -> bool {
        self.required.iter().chain(&self.optional).any(|known| known == name)
    }
}

/// Renders a parameter as text: strings verbatim, anything else as JSON.
pub fn text_param(input: &InvocationInput, name: &str) -> Option<String> {
    input.get(name).map(|value| match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
