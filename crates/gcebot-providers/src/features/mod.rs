pub mod command_registry;
pub mod compute_provider;
pub mod messaging_provider;
