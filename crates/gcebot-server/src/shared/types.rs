pub use gcebot_core::{InstanceState, InteractionRequest, InteractionResponse, InteractionType};

use std::fmt;
use std::str::FromStr;

/// Result of a mutating gateway call. `failed` is set when the provider rejected
/// the request or could not be reached; `message` is always user-displayable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub message: String,
    pub failed: bool,
}

impl TransitionOutcome {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            failed: false,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            failed: true,
        }
    }
}

/// How often the cost-guard re-sends its warning while the instance stays up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotifyPolicy {
    /// Warn on every check that observes `RUNNING`.
    #[default]
    EveryCheck,
    /// Warn once, then stay quiet until a non-running state has been observed.
    OncePerRunningPeriod,
}

impl NotifyPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyPolicy::EveryCheck => "every-check",
            NotifyPolicy::OncePerRunningPeriod => "once-per-running-period",
        }
    }
}

impl fmt::Display for NotifyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotifyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "every-check" | "every_check" | "always" => Ok(NotifyPolicy::EveryCheck),
            "once-per-running-period" | "once_per_running_period" | "once" => {
                Ok(NotifyPolicy::OncePerRunningPeriod)
            }
            other => Err(format!("unknown notify policy: {other}")),
        }
    }
}
