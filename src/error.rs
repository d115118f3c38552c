use serde_json::Value as JsonValue;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum SiteflowError {
    /// Network or request execution error from `reqwest`; no response was received.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// Structured error object returned by the API alongside a `400 Bad Request`.
    #[error("api error: {0}")]
    Application(JsonValue),
    /// Success response whose body is not valid JSON.
    #[error("decode error: {0}")]
    Decode(String),
    /// Request body could not be serialized to JSON.
    #[error("encode error: {0}")]
    Encode(String),
    /// Resource path does not start with `/`.
    #[error("invalid resource path '{0}': must start with '/'")]
    InvalidPath(String),
    /// Missing or malformed client configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SiteflowError {
    /// HTTP status carried by the error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` when no HTTP response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Unwraps the server's embedded error object from a `400` response.
    ///
    /// Any other error, including a `400` whose body is not JSON or carries
    /// no (or a `null`) `error` field, is returned unchanged.
    pub(crate) fn normalize(self) -> Self {
        match self {
            Self::Http { status: 400, body } => {
                match serde_json::from_str::<JsonValue>(&body) {
                    Ok(JsonValue::Object(mut fields)) => match fields.remove("error") {
                        Some(error) if is_truthy(&error) => Self::Application(error),
                        _ => Self::Http { status: 400, body },
                    },
                    _ => Self::Http { status: 400, body },
                }
            }
            other => other,
        }
    }
}

/// `null`, `false`, `0` and `""` carry no error detail.
fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(flag) => *flag,
        JsonValue::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        JsonValue::String(text) => !text.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}
