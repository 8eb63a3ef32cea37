pub mod command_handler;
pub mod entry_commands;
pub mod handlers;
pub mod user_commands;

pub use command_handler::{Command, CommandHandler};
