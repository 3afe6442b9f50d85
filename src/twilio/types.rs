//! Resource types returned by the telephony REST API.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a call as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallStatus {
    Queued,
    Ringing,
    InProgress,
    Canceled,
    Completed,
    Busy,
    Failed,
    NoAnswer,
}

impl CallStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Queued => "queued",
            CallStatus::Ringing => "ringing",
            CallStatus::InProgress => "in-progress",
            CallStatus::Canceled => "canceled",
            CallStatus::Completed => "completed",
            CallStatus::Busy => "busy",
            CallStatus::Failed => "failed",
            CallStatus::NoAnswer => "no-answer",
        }
    }
}

/// A voice call resource.
///
/// Only `sid` is guaranteed by the API; everything else is optional so
/// partial records parse cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Call {
    pub sid: String,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub status: Option<CallStatus>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
}

/// A text message resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub sid: String,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub date_sent: Option<String>,
}

/// List envelope for `Calls.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct CallPage {
    #[serde(default)]
    pub calls: Vec<Call>,
}

/// List envelope for `Messages.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct MessagePage {
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&CallStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::to_string(&CallStatus::NoAnswer).unwrap(),
            "\"no-answer\""
        );
    }

    #[test]
    fn test_call_status_as_str_matches_serde() {
        for status in [
            CallStatus::Queued,
            CallStatus::Ringing,
            CallStatus::InProgress,
            CallStatus::Canceled,
            CallStatus::Completed,
            CallStatus::Busy,
            CallStatus::Failed,
            CallStatus::NoAnswer,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_call_parses_partial_record() {
        let call: Call = serde_json::from_str(r#"{"sid": "CA123"}"#).unwrap();
        assert_eq!(call.sid, "CA123");
        assert!(call.from.is_none());
        assert!(call.status.is_none());
    }

    #[test]
    fn test_call_parses_full_record() {
        let call: Call = serde_json::from_str(
            r#"{
                "sid": "CA123",
                "from": "+15551234567",
                "to": "+15559876543",
                "status": "queued",
                "direction": "inbound",
                "date_created": "Tue, 25 Aug 2026 10:00:00 +0000"
            }"#,
        )
        .unwrap();
        assert_eq!(call.from.as_deref(), Some("+15551234567"));
        assert_eq!(call.status, Some(CallStatus::Queued));
    }

    #[test]
    fn test_call_page_defaults_to_empty() {
        let page: CallPage = serde_json::from_str(r#"{"page": 0}"#).unwrap();
        assert!(page.calls.is_empty());
    }

    #[test]
    fn test_message_page_parses_list() {
        let page: MessagePage = serde_json::from_str(
            r#"{"messages": [{"sid": "SM1", "body": "hello"}]}"#,
        )
        .unwrap();
        assert_eq!(page.messages.len(), 1);
        assert_eq!(page.messages[0].body.as_deref(), Some("hello"));
    }
}
