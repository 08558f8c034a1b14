use crate::features::instance_lifecycle::service::LifecycleService;
use crate::features::observability::controller::global_observability_controller;
use crate::shared::types::{InteractionRequest, InteractionResponse, InteractionType};
use std::sync::Arc;
use tracing::{debug, info};

pub const HELLO_MESSAGE: &str = "I am the GCP GPU manager bot.";
pub const UNKNOWN_COMMAND_MESSAGE: &str = "Unknown command.";

/// The fixed slash-command set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Hello,
    Start,
    Stop,
    Status,
}

impl Command {
    pub const ALL: [Command; 4] = [Command::Hello, Command::Start, Command::Stop, Command::Status];

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Hello => "hello",
            Command::Start => "start",
            Command::Stop => "stop",
            Command::Status => "status",
        }
    }
}

pub struct CommandDispatcher {
    lifecycle: Arc<LifecycleService>,
}

impl CommandDispatcher {
    pub fn new(lifecycle: Arc<LifecycleService>) -> Self {
        Self { lifecycle }
    }

    /// Produces exactly one response for every request.
    pub async fn dispatch(&self, request: &InteractionRequest) -> InteractionResponse {
        match request.kind {
            InteractionType::Ping => {
                debug!("Answering handshake ping");
                InteractionResponse::pong()
            }
            InteractionType::ApplicationCommand => {
                let content = match request.command_name().and_then(Command::parse) {
                    Some(command) => self.run(command).await,
                    None => {
                        info!(name = ?request.command_name(), "Unknown command");
                        global_observability_controller().record_command("unknown");
                        UNKNOWN_COMMAND_MESSAGE.to_string()
                    }
                };
                InteractionResponse::message(content)
            }
            InteractionType::Other(kind) => {
                info!(kind, "Unsupported interaction type");
                global_observability_controller().record_command("unknown");
                InteractionResponse::message(UNKNOWN_COMMAND_MESSAGE)
            }
        }
    }

    async fn run(&self, command: Command) -> String {
        info!(command = command.name(), "Dispatching command");
        global_observability_controller().record_command(command.name());

        match command {
            Command::Hello => HELLO_MESSAGE.to_string(),
            Command::Start => self.lifecycle.handle_start().await,
            Command::Stop => self.lifecycle.handle_stop().await,
            Command::Status => self.lifecycle.handle_status().await,
        }
    }
}
