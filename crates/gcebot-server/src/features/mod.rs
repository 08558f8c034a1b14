pub mod command_dispatch;
pub mod cost_guard;
pub mod instance_gateway;
pub mod instance_lifecycle;
pub mod observability;
pub mod signature_verification;
