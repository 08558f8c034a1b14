pub mod features;
pub mod server;
pub mod shared;

pub use server::{build_router, build_state, AppState};
pub use shared::config::BotConfig;
pub use shared::error::{BotError, BotResult};
