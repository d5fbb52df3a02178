//! Uniform response wrapper shared by the server and the client.

use serde::{Deserialize, Serialize};

/// `{ status, message, data?, error? }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: u16,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Successful response carrying a payload
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: 200,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    /// Failure response, optionally carrying the underlying cause
    pub fn failure(status: u16, message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
            error,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_omits_data_field() {
        let envelope: Envelope<()> = Envelope::failure(404, "Meeting not found", None);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json, serde_json::json!({ "status": 404, "message": "Meeting not found" }));
    }

    #[test]
    fn decodes_without_optional_fields() {
        let envelope: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"status":200,"message":"ok","data":[1,2]}"#).unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.data, Some(vec![1, 2]));
        assert!(envelope.error.is_none());
    }

    #[test]
    fn decodes_failure_for_payload_without_default() {
        let envelope: Envelope<crate::types::DeleteManyResult> = serde_json::from_str(
            r#"{"status":404,"message":"No meetings found to delete"}"#,
        )
        .unwrap();
        assert!(!envelope.is_success());
        assert!(envelope.data.is_none());
    }
}
