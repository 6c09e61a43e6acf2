use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the backend when a method call raises.
///
/// Every field is optional; proxies and older backends send partial bodies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteErrorBody {
    #[serde(default)]
    pub exc_type: Option<String>,
    #[serde(default)]
    pub exception: Option<String>,
    #[serde(default, rename = "_server_messages")]
    pub server_messages: Option<String>,
}

impl RemoteErrorBody {
    /// One-line description for logs, falling back to the raw body.
    pub fn describe(&self, raw: &str) -> String {
        match (&self.exc_type, &self.exception) {
            (_, Some(exception)) => exception.clone(),
            (Some(exc_type), None) => exc_type.clone(),
            (None, None) => match &self.server_messages {
                Some(messages) => messages.clone(),
                None => raw.trim().to_string(),
            },
        }
    }
}

/// A method call the backend answered with a non-success status.
#[derive(Debug, Clone, Error)]
#[error("remote method failed with status {status}: {detail}")]
pub struct RemoteFailure {
    pub status: u16,
    pub detail: String,
}

impl RemoteFailure {
    pub fn from_response(status: u16, raw_body: &str) -> Self {
        let body = serde_json::from_str::<RemoteErrorBody>(raw_body).unwrap_or_default();
        Self {
            status,
            detail: body.describe(raw_body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_exception_text() {
        let failure = RemoteFailure::from_response(
            417,
            r#"{"exc_type":"ValidationError","exception":"frappe.exceptions.ValidationError: Item not found"}"#,
        );
        assert_eq!(failure.status, 417);
        assert_eq!(
            failure.detail,
            "frappe.exceptions.ValidationError: Item not found"
        );
    }

    #[test]
    fn falls_back_to_raw_body_when_not_json() {
        let failure = RemoteFailure::from_response(502, "  Bad Gateway\n");
        assert_eq!(failure.detail, "Bad Gateway");
        assert_eq!(
            failure.to_string(),
            "remote method failed with status 502: Bad Gateway"
        );
    }
}
