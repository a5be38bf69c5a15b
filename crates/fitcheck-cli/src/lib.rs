// Library interface for fitcheck-cli
// This allows integration tests to access the command parser, staging and themes.

#[path = "commands.rs"]
pub mod commands;

#[path = "staging.rs"]
pub mod staging;

#[path = "theme.rs"]
pub mod theme;

pub use commands::{handle_command, CommandResult};
pub use staging::Staged;
pub use theme::Theme;
