use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::models::error_record::ErrorRecord;
use crate::params::MissingParams;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    MissingParameters(#[from] MissingParams),

    #[error("request to the platform failed: {}", error_chain(.0))]
    Transport(#[from] reqwest::Error),

    /// The status line arrived but the body could not be read.
    #[error("failed to read platform reply ({status}): {}", error_chain(.source))]
    ResponseBody {
        status: StatusCode,
        source: reqwest::Error,
    },

    #[error("platform replied with {status}: {body}")]
    Upstream { status: StatusCode, body: String },
}

impl ActionError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } | Self::ResponseBody { status, .. } => {
                Some(status.as_u16())
            }
            Self::MissingParameters(_) | Self::Transport(_) => None,
        }
    }

    /// Record form of a failed platform call. `None` when no call was made.
    pub fn to_record(&self) -> Option<ErrorRecord> {
        match self {
            Self::MissingParameters(_) => None,
            Self::Transport(e) => Some(ErrorRecord {
                status_code: None,
                error: Some(error_chain(e)),
                body: String::new(),
            }),
            Self::ResponseBody { status, source } => Some(ErrorRecord {
                status_code: Some(status.as_u16()),
                error: Some(error_chain(source)),
                body: String::new(),
            }),
            Self::Upstream { status, body } => Some(ErrorRecord {
                status_code: Some(status.as_u16()),
                error: None,
                body: body.clone(),
            }),
        }
    }

    /// Value placed under `"error"` in the action result.
    pub fn to_payload(&self) -> Value {
        match self.to_record() {
            Some(record) => serde_json::to_value(record).unwrap_or(Value::Null),
            None => Value::String(self.to_string()),
        }
    }
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
