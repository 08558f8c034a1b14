//! Registers the bot's slash commands with Discord.
//!
//! Usage: `register-commands [definitions.json]`

use gcebot_providers::{load_command_definitions, DiscordCommandRegistrar};
use gcebot_server::BotError;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEFAULT_DEFINITIONS_PATH: &str = "commands/discord_commands.json";

fn required_env(key: &str) -> Result<String, BotError> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| BotError::config(format!("{key} is required")))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let bot_token = required_env("DISCORD_TOKEN")?;
    let application_id = required_env("DISCORD_APPLICATION_ID")?;
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DEFINITIONS_PATH.to_string());

    let definitions = load_command_definitions(&path).await?;
    info!(%path, count = definitions.len(), "Loaded command definitions");

    let registrar = DiscordCommandRegistrar::new(application_id, bot_token)?;
    for definition in &definitions {
        let status = registrar.register(definition).await?;
        if !(200..300).contains(&status) {
            warn!(command = %definition.name, status, "Discord rejected command");
        }
        println!("Command {} created: {}", definition.name, status);
    }

    Ok(())
}
