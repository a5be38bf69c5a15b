use std::path::PathBuf;

/// Result of processing a slash command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// Display a message to the user.
    Message(String),
    /// Quit the application.
    Quit,
    /// Set the display name used in the identity tag.
    SetName(String),
    /// Set the email used in the identity tag.
    SetEmail(String),
    /// Present an access code to the gate.
    SetAccessCode(String),
    /// Attach a file excerpt to the next message.
    StageFile(PathBuf),
    /// Run a web search with the next message.
    StageSearch(String),
    /// Generate an image with the next message.
    StageImage(String),
    /// Drop everything staged for the next message.
    Unstage,
    /// Show model, identity, and staged tools.
    ShowStatus,
    /// Change the theme.
    ThemeChanged(String),
    /// Not a command - treat as regular input.
    NotACommand,
}

pub fn handle_command(input: &str) -> CommandResult {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/help" | "/h" => show_help(),
        "/exit" | "/quit" | "/q" => CommandResult::Quit,

        // Identity and access
        "/name" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /name <your name>".into())
            } else {
                CommandResult::SetName(arg.to_string())
            }
        }
        "/email" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /email <your district email>".into())
            } else {
                CommandResult::SetEmail(arg.to_string())
            }
        }
        "/code" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /code <access code>".into())
            } else {
                CommandResult::SetAccessCode(arg.to_string())
            }
        }

        // Tools for the next message
        "/file" | "/upload" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /file <path>\nThe first 1000 characters are added to your next message.".into())
            } else {
                CommandResult::StageFile(PathBuf::from(arg))
            }
        }
        "/search" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /search <query>\nUp to 5 result snippets are added to your next message.".into())
            } else {
                CommandResult::StageSearch(arg.to_string())
            }
        }
        "/image" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /image <prompt>\nAn image is generated when you send your next message.".into())
            } else {
                CommandResult::StageImage(arg.to_string())
            }
        }
        "/unstage" => CommandResult::Unstage,

        // Display
        "/status" => CommandResult::ShowStatus,
        "/theme" => {
            if arg.is_empty() {
                let themes = crate::theme::Theme::all_names().join(", ");
                CommandResult::Message(format!("Available themes: {themes}\nUsage: /theme <theme-name>"))
            } else {
                CommandResult::ThemeChanged(arg.to_string())
            }
        }
        "/version" => CommandResult::Message(format!("FitCheck CLI v{}", env!("CARGO_PKG_VERSION"))),

        // Unknown command
        _ => {
            if input.starts_with('/') {
                CommandResult::Message(format!("Unknown command: {cmd}. Type /help for commands."))
            } else {
                CommandResult::NotACommand
            }
        }
    }
}

fn show_help() -> CommandResult {
    let help_text = "\
╭─ FitCheck Commands ────────────────────────────────────────────╮

  ABOUT YOU
    /name <name>              Set your name
    /email <email>            Set your district email
    /code <code>              Enter the access code

  TOOLS (apply to your next message)
    /file <path>              Add an excerpt of a document
    /search <query>           Add web search snippets
    /image <prompt>           Generate an image
    /unstage                  Clear staged tools

  DISPLAY
    /status                   Show model, identity, and staged tools
    /theme <name>             Change color theme

  OTHER
    /help, /h                 Show this help message
    /version                  Show version information
    /exit, /quit, /q          Quit the application

╰────────────────────────────────────────────────────────────────╯";

    CommandResult::Message(help_text.into())
}
