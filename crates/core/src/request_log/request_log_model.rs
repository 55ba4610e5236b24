use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One line of the request log.
///
/// Serializes as `{"id", "timestamp", "request", "response"}` on success or
/// `{"id", "timestamp", "request", "error"}` on failure.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub request: Value,
    #[serde(flatten)]
    pub outcome: LogOutcome,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum LogOutcome {
    Response(Value),
    Error(LoggedError),
}

/// Failure as recorded for diagnosis: the message shown to the caller plus
/// the raw error it was derived from.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggedError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub detail: String,
}

impl LogEntry {
    pub fn response(id: Uuid, request: Value, response: Value) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            request,
            outcome: LogOutcome::Response(response),
        }
    }

    pub fn error(id: Uuid, request: Value, error: LoggedError) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            request,
            outcome: LogOutcome::Error(error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, LogOutcome::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_entry_shape() {
        let entry = LogEntry::response(
            Uuid::new_v4(),
            json!({"gemType": "Ruby"}),
            json!({"ok": true, "totalValue": 1500}),
        );
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["request"]["gemType"], "Ruby");
        assert_eq!(value["response"]["totalValue"], 1500);
        assert!(value.get("error").is_none());
        assert!(value["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_error_entry_shape() {
        let entry = LogEntry::error(
            Uuid::new_v4(),
            json!({}),
            LoggedError {
                message: "Unknown error.".to_string(),
                code: None,
                detail: "Upstream error: GEMGUIDE - HTTP 418".to_string(),
            },
        );
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["error"]["message"], "Unknown error.");
        assert!(value["error"].get("code").is_none());
        assert!(value.get("response").is_none());
        assert!(entry.is_error());
    }

    #[test]
    fn test_entry_survives_a_json_line() {
        let entry = LogEntry::response(Uuid::new_v4(), json!({"a": 1}), json!({"b": 2}));
        let line = serde_json::to_string(&entry).unwrap();
        assert!(!line.contains('\n'));
        let parsed: LogEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, entry);
    }
}
