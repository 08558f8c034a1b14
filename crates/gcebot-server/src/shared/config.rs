//! Process configuration, read once from the environment at startup.

use crate::features::signature_verification::PublicKey;
use crate::shared::error::{BotError, BotResult};
use crate::shared::types::NotifyPolicy;
use gcebot_providers::{ComputeTarget, TokenSource};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 8;

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bind_addr: SocketAddr,
    pub public_key: PublicKey,
    pub target: ComputeTarget,
    pub token_source: TokenSource,
    pub request_timeout: Duration,
    pub notification_webhook_url: Option<String>,
    pub notify_policy: NotifyPolicy,
    pub cost_guard_interval: Option<Duration>,
}

impl BotConfig {
    pub fn from_env() -> BotResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> BotResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let require =
            |key: &str| get(key).ok_or_else(|| BotError::config(format!("{key} is required")));

        let public_key =
            PublicKey::from_hex(&require("DISCORD_PUBLIC_KEY")?).map_err(|e| match e {
                BotError::Config(msg) => BotError::config(format!("DISCORD_PUBLIC_KEY: {msg}")),
                other => other,
            })?;
        let target = ComputeTarget::new(
            require("GCP_PROJECT_ID")?,
            require("GCP_ZONE")?,
            require("INSTANCE_NAME")?,
        );

        let bind_addr = match (get("BIND_ADDR"), get("PORT")) {
            (Some(addr), _) => addr,
            (None, Some(port)) => format!("0.0.0.0:{port}"),
            (None, None) => DEFAULT_BIND_ADDR.to_string(),
        };
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| BotError::config(format!("invalid bind address {bind_addr}: {e}")))?;

        let token_source = match get("GCP_ACCESS_TOKEN") {
            Some(token) => TokenSource::Static(token),
            None => TokenSource::metadata_server(),
        };

        let request_timeout = match get("GCP_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                Duration::from_secs(parse_positive_secs("GCP_REQUEST_TIMEOUT_SECS", &raw)?)
            }
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let notify_policy = match get("COST_GUARD_NOTIFY_POLICY") {
            Some(raw) => raw
                .parse::<NotifyPolicy>()
                .map_err(|e| BotError::config(format!("COST_GUARD_NOTIFY_POLICY: {e}")))?,
            None => NotifyPolicy::default(),
        };

        let cost_guard_interval = get("COST_GUARD_INTERVAL_SECS")
            .map(|raw| parse_positive_secs("COST_GUARD_INTERVAL_SECS", &raw))
            .transpose()?
            .map(Duration::from_secs);

        Ok(Self {
            bind_addr,
            public_key,
            target,
            token_source,
            request_timeout,
            notification_webhook_url: get("DISCORD_WEBHOOK_URL"),
            notify_policy,
            cost_guard_interval,
        })
    }
}

fn parse_positive_secs(key: &str, raw: &str) -> BotResult<u64> {
    match raw.parse::<u64>() {
        Ok(0) => Err(BotError::config(format!("{key} must be greater than zero"))),
        Ok(secs) => Ok(secs),
        Err(e) => Err(BotError::config(format!("{key} is not a number: {e}"))),
    }
}
