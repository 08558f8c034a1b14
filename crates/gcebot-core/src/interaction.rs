//! Wire types for chat-platform interactions.
//!
//! Inbound payloads look like `{"type": 2, "data": {"name": "status"}}`;
//! replies are either `{"type": 1}` or `{"type": 4, "data": {"content": "..."}}`.

use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub enum InteractionType {
    Ping,
    ApplicationCommand,
    Other(u64),
}

impl From<u64> for InteractionType {
    fn from(value: u64) -> Self {
        match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            other => Self::Other(other),
        }
    }
}

impl From<InteractionType> for u64 {
    fn from(kind: InteractionType) -> Self {
        match kind {
            InteractionType::Ping => 1,
            InteractionType::ApplicationCommand => 2,
            InteractionType::Other(value) => value,
        }
    }
}

/// A verified inbound interaction. Fields the bot does not use are ignored.
///
/// `data` is kept as raw JSON so that its shape only matters once a command
/// name is actually read from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRequest {
    #[serde(rename = "type")]
    pub kind: InteractionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl InteractionRequest {
    pub fn ping() -> Self {
        Self {
            kind: InteractionType::Ping,
            data: None,
        }
    }

    pub fn command(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            kind: InteractionType::ApplicationCommand,
            data: Some(json!({ "name": name })),
        }
    }

    /// Parses the raw request body. Only call this after the signature over
    /// the same bytes has been verified.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| CoreError::InvalidInteraction(e.to_string()))
    }

    pub fn command_name(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.get("name"))
            .and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum InteractionResponseType {
    Pong,
    ChannelMessageWithSource,
}

impl TryFrom<u8> for InteractionResponseType {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Pong),
            4 => Ok(Self::ChannelMessageWithSource),
            other => Err(CoreError::UnsupportedResponseType(other)),
        }
    }
}

impl From<InteractionResponseType> for u8 {
    fn from(kind: InteractionResponseType) -> Self {
        match kind {
            InteractionResponseType::Pong => 1,
            InteractionResponseType::ChannelMessageWithSource => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionResponseData {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: InteractionResponseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionResponseData>,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: InteractionResponseType::Pong,
            data: None,
        }
    }

    pub fn message(content: impl Into<String>) -> Self {
        Self {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(InteractionResponseData {
                content: content.into(),
            }),
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.data.as_ref().map(|data| data.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ping() {
        let request = InteractionRequest::from_slice(br#"{"type":1}"#).unwrap();
        assert_eq!(request, InteractionRequest::ping());
        assert_eq!(request.command_name(), None);
    }

    #[test]
    fn test_parse_command_ignores_extra_fields() {
        let body = br#"{"type":2,"id":"123","token":"abc","data":{"id":"9","name":"status","type":1}}"#;
        let request = InteractionRequest::from_slice(body).unwrap();
        assert_eq!(request.kind, InteractionType::ApplicationCommand);
        assert_eq!(request.command_name(), Some("status"));
    }

    #[test]
    fn test_parse_unknown_interaction_type() {
        let request = InteractionRequest::from_slice(br#"{"type":3}"#).unwrap();
        assert_eq!(request.kind, InteractionType::Other(3));
    }

    #[test]
    fn test_parse_ping_with_odd_data() {
        for body in [
            &br#"{"type":1,"data":"x"}"#[..],
            br#"{"type":1,"data":{"name":7}}"#,
            br#"{"type":1,"data":null}"#,
        ] {
            let request = InteractionRequest::from_slice(body).unwrap();
            assert_eq!(request.kind, InteractionType::Ping);
        }
    }

    #[test]
    fn test_parse_wide_interaction_type() {
        let request = InteractionRequest::from_slice(br#"{"type":300}"#).unwrap();
        assert_eq!(request.kind, InteractionType::Other(300));
    }

    #[test]
    fn test_command_name_ignores_non_string_name() {
        let request =
            InteractionRequest::from_slice(br#"{"type":2,"data":{"name":7}}"#).unwrap();
        assert_eq!(request.command_name(), None);

        let request = InteractionRequest::from_slice(br#"{"type":2,"data":[1,2]}"#).unwrap();
        assert_eq!(request.command_name(), None);
    }

    #[test]
    fn test_parse_rejects_malformed_body() {
        let err = InteractionRequest::from_slice(b"not json").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInteraction(_)));

        let err = InteractionRequest::from_slice(br#"{"data":{}}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInteraction(_)));
    }

    #[test]
    fn test_pong_serializes_without_data() {
        let json = serde_json::to_value(InteractionResponse::pong()).unwrap();
        assert_eq!(json, serde_json::json!({"type": 1}));
    }

    #[test]
    fn test_message_serializes_with_content() {
        let json = serde_json::to_value(InteractionResponse::message("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"type": 4, "data": {"content": "hi"}}));
    }

    #[test]
    fn test_response_type_rejects_unsupported_value() {
        let result: std::result::Result<InteractionResponse, _> =
            serde_json::from_str(r#"{"type":7}"#);
        assert!(result.is_err());
        assert_eq!(
            InteractionResponseType::try_from(7),
            Err(CoreError::UnsupportedResponseType(7))
        );
    }
}
