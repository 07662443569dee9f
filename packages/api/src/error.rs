//! Errors returned by every [`crate::ApiClient`] call.
//!
//! Non-success responses are classified by status. The human-readable message is
//! taken from the FastAPI `detail` field when the body carries one, so the text the
//! server chose reaches the view unchanged.

use serde_json::Value;

use crate::upload::UploadError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// 422 with field messages, one `loc.path: msg` per line.
    #[error("{0}")]
    Validation(String),
    /// 401. Already handled by the auth middleware by the time a view sees it.
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    /// The body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl ApiError {
    /// Build the error for a non-success response.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let message = detail_message(body);
        match status {
            401 => Self::Unauthorized(message.unwrap_or_else(|| "Not authenticated".to_string())),
            404 => Self::NotFound(message.unwrap_or_else(|| "Not found".to_string())),
            422 => Self::Validation(message.unwrap_or_else(|| "Validation failed".to_string())),
            _ => {
                let message = message
                    .or_else(|| {
                        let text = String::from_utf8_lossy(body).trim().to_string();
                        (!text.is_empty()).then_some(text)
                    })
                    .unwrap_or_else(|| format!("request failed with status {status}"));
                Self::Server { status, message }
            }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

/// Extract `detail` from a FastAPI error body.
///
/// A string detail is returned as-is. A list of validation items becomes one
/// `loc.joined.by.dots: msg` line per item.
fn detail_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let lines: Vec<String> = items.iter().map(validation_line).collect();
            (!lines.is_empty()).then(|| lines.join("\n"))
        }
        other => Some(other.to_string()),
    }
}

fn validation_line(item: &Value) -> String {
    let msg = item
        .get("msg")
        .and_then(Value::as_str)
        .unwrap_or("invalid value");
    let loc: Vec<String> = item
        .get("loc")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .map(|p| match p {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    if loc.is_empty() {
        msg.to_string()
    } else {
        format!("{}: {}", loc.join("."), msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail_is_verbatim() {
        let err = ApiError::from_response(401, br#"{"detail":"Invalid username or password"}"#);
        assert_eq!(err, ApiError::Unauthorized("Invalid username or password".to_string()));
        assert_eq!(err.to_string(), "Invalid username or password");

        let err = ApiError::from_response(404, br#"{"detail":"Person not found"}"#);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Person not found");
    }

    #[test]
    fn test_validation_items_are_joined() {
        let body = br#"{"detail":[
            {"loc":["body","first_name"],"msg":"field required","type":"value_error.missing"},
            {"loc":["body","participants",0,"participant_name"],"msg":"field required"}
        ]}"#;
        let err = ApiError::from_response(422, body);
        assert_eq!(
            err.to_string(),
            "body.first_name: field required\nbody.participants.0.participant_name: field required"
        );
    }

    #[test]
    fn test_server_error_falls_back_to_body_then_status() {
        let err = ApiError::from_response(500, b"upstream exploded");
        assert_eq!(
            err,
            ApiError::Server {
                status: 500,
                message: "upstream exploded".to_string()
            }
        );

        let err = ApiError::from_response(503, b"");
        assert_eq!(err.to_string(), "request failed with status 503");
    }
}
