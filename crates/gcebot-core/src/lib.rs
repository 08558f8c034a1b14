pub mod interaction;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use interaction::{
    InteractionRequest, InteractionResponse, InteractionResponseData, InteractionResponseType,
    InteractionType,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid interaction payload: {0}")]
    InvalidInteraction(String),
    #[error("Unsupported interaction response type: {0}")]
    UnsupportedResponseType(u8),
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Lifecycle state of the managed compute instance as reported by the provider.
///
/// `Unknown` is never reported by the provider itself; it stands in for a
/// state query that failed. Provider values outside the named set are kept
/// verbatim in `Other` so they can still be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InstanceState {
    Running,
    Terminated,
    Stopping,
    Provisioning,
    Staging,
    Suspended,
    Unknown,
    Other(String),
}

impl InstanceState {
    /// Parses a raw provider status. Never fails: unrecognised values become `Other`.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "RUNNING" => Self::Running,
            "TERMINATED" => Self::Terminated,
            "STOPPING" => Self::Stopping,
            "PROVISIONING" => Self::Provisioning,
            "STAGING" => Self::Staging,
            "SUSPENDED" => Self::Suspended,
            "UNKNOWN" | "" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "RUNNING",
            Self::Terminated => "TERMINATED",
            Self::Stopping => "STOPPING",
            Self::Provisioning => "PROVISIONING",
            Self::Staging => "STAGING",
            Self::Suspended => "SUSPENDED",
            Self::Unknown => "UNKNOWN",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for InstanceState {
    fn from(raw: String) -> Self {
        Self::from_raw(&raw)
    }
}

impl From<&str> for InstanceState {
    fn from(raw: &str) -> Self {
        Self::from_raw(raw)
    }
}

impl From<InstanceState> for String {
    fn from(state: InstanceState) -> Self {
        state.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_named_states() {
        assert_eq!(InstanceState::from_raw("RUNNING"), InstanceState::Running);
        assert_eq!(InstanceState::from_raw("TERMINATED"), InstanceState::Terminated);
        assert_eq!(InstanceState::from_raw("STOPPING"), InstanceState::Stopping);
        assert_eq!(InstanceState::from_raw("PROVISIONING"), InstanceState::Provisioning);
        assert_eq!(InstanceState::from_raw("STAGING"), InstanceState::Staging);
        assert_eq!(InstanceState::from_raw("SUSPENDED"), InstanceState::Suspended);
        assert_eq!(InstanceState::from_raw("UNKNOWN"), InstanceState::Unknown);
    }

    #[test]
    fn test_from_raw_keeps_unmapped_values() {
        let state = InstanceState::from_raw("REPAIRING");
        assert_eq!(state, InstanceState::Other("REPAIRING".to_string()));
        assert_eq!(state.as_str(), "REPAIRING");
        assert!(!state.is_running());
    }

    #[test]
    fn test_empty_status_is_unknown() {
        assert_eq!(InstanceState::from_raw("  "), InstanceState::Unknown);
    }

    #[test]
    fn test_only_running_is_running() {
        assert!(InstanceState::Running.is_running());
        for state in [
            InstanceState::Provisioning,
            InstanceState::Staging,
            InstanceState::Suspended,
            InstanceState::Unknown,
        ] {
            assert!(!state.is_running());
        }
    }

    #[test]
    fn test_state_serializes_as_raw_string() {
        let json = serde_json::to_string(&InstanceState::Staging).unwrap();
        assert_eq!(json, "\"STAGING\"");

        let parsed: InstanceState = serde_json::from_str("\"SUSPENDING\"").unwrap();
        assert_eq!(parsed, InstanceState::Other("SUSPENDING".to_string()));
    }

    #[test]
    fn test_core_error_messages() {
        let err = CoreError::InvalidInteraction("missing type".to_string());
        assert!(err.to_string().contains("Invalid interaction payload"));

        let err = CoreError::UnsupportedResponseType(9);
        assert_eq!(err.to_string(), "Unsupported interaction response type: 9");
    }

    mod property_state_parsing_is_total {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn property_any_status_parses(raw in "\\PC*") {
                let state = InstanceState::from_raw(&raw);
                prop_assert_eq!(state.is_running(), raw.trim() == "RUNNING");
            }

            #[test]
            fn property_unmapped_status_round_trips(raw in "[A-Z_]{1,16}") {
                let state = InstanceState::from_raw(&raw);
                prop_assert_eq!(state.as_str(), raw.as_str());
            }
        }
    }
}
