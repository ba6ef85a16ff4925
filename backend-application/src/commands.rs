pub mod config_commands;
pub mod page_commands;
pub mod subscription_commands;
