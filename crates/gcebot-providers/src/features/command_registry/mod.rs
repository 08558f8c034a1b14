//! Slash-command registration against the Discord application commands API.

use crate::{ProviderError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// One command definition as accepted by `POST /applications/{id}/commands`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<serde_json::Value>,
}

pub fn parse_command_definitions(raw: &str) -> Result<Vec<CommandDefinition>> {
    let definitions: Vec<CommandDefinition> =
        serde_json::from_str(raw).map_err(|e| ProviderError::Decode(e.to_string()))?;

    if let Some(bad) = definitions.iter().find(|d| d.name.trim().is_empty()) {
        return Err(ProviderError::Decode(format!(
            "command with empty name (description: {:?})",
            bad.description
        )));
    }

    Ok(definitions)
}

pub async fn load_command_definitions(path: impl AsRef<Path>) -> Result<Vec<CommandDefinition>> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ProviderError::Io(format!("{}: {e}", path.display())))?;
    parse_command_definitions(&raw)
}

pub struct DiscordCommandRegistrar {
    client: Client,
    application_id: String,
    bot_token: String,
    api_base: String,
}

impl DiscordCommandRegistrar {
    pub fn new(application_id: impl Into<String>, bot_token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ProviderError::Http(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            application_id: application_id.into(),
            bot_token: bot_token.into(),
            api_base: DISCORD_API_BASE.to_string(),
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn commands_url(&self) -> String {
        format!(
            "{}/applications/{}/commands",
            self.api_base.trim_end_matches('/'),
            self.application_id
        )
    }

    /// Registers one command and returns the HTTP status code Discord answered with.
    pub async fn register(&self, definition: &CommandDefinition) -> Result<u16> {
        let response = self
            .client
            .post(self.commands_url())
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bot {}", self.bot_token),
            )
            .json(definition)
            .send()
            .await
            .map_err(ProviderError::from_reqwest)?;

        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_definitions() {
        let raw = r#"[
            {"name": "start", "description": "Start the GPU server"},
            {"name": "echo", "description": "Echo", "options": [{"name": "text", "type": 3}]}
        ]"#;

        let definitions = parse_command_definitions(raw).unwrap();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].name, "start");
        assert!(definitions[0].options.is_empty());
        assert_eq!(definitions[1].options.len(), 1);
    }

    #[test]
    fn test_parse_rejects_empty_name() {
        let raw = r#"[{"name": " ", "description": "broken"}]"#;
        let err = parse_command_definitions(raw).unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[test]
    fn test_definition_without_options_omits_field() {
        let definition = CommandDefinition {
            name: "status".to_string(),
            description: "Show state".to_string(),
            options: vec![],
        };
        let json = serde_json::to_value(&definition).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "status", "description": "Show state"})
        );
    }

    #[test]
    fn test_commands_url() {
        let registrar = DiscordCommandRegistrar::new("1234", "token").unwrap();
        assert_eq!(
            registrar.commands_url(),
            "https://discord.com/api/v10/applications/1234/commands"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = tokio_test::block_on(load_command_definitions("/nonexistent/commands.json"))
            .unwrap_err();
        assert!(matches!(err, ProviderError::Io(_)));
    }
}
