use fitcheck_cli::commands::{handle_command, CommandResult};
use fitcheck_cli::Theme;
use fitcheck_core::Role;
use std::path::PathBuf;

// ========================================================================
// Command Parsing Tests (commands.rs)
// ========================================================================

// --- BASIC SLASH COMMANDS ---

#[test]
fn test_help_command() {
    let result = handle_command("/help");

    if let CommandResult::Message(msg) = result {
        assert!(msg.contains("FitCheck Commands"));
        assert!(msg.contains("/search"));
        assert!(msg.contains("/code"));
    } else {
        panic!("expected help message");
    }
}

#[test]
fn test_help_command_short_alias() {
    assert_eq!(handle_command("/h"), handle_command("/help"));
}

#[test]
fn test_quit_aliases() {
    for cmd in ["/exit", "/quit", "/q"] {
        assert_eq!(handle_command(cmd), CommandResult::Quit, "{cmd}");
    }
}

#[test]
fn test_version_command() {
    let result = handle_command("/version");
    assert!(matches!(result, CommandResult::Message(ref m) if m.starts_with("FitCheck CLI v")));
}

// --- IDENTITY AND ACCESS ---

#[test]
fn test_name_command_keeps_spaces() {
    assert_eq!(
        handle_command("/name Ada Lovelace"),
        CommandResult::SetName("Ada Lovelace".into())
    );
}

#[test]
fn test_email_command() {
    assert_eq!(
        handle_command("/email ada@district.org"),
        CommandResult::SetEmail("ada@district.org".into())
    );
}

#[test]
fn test_code_command_trims_argument() {
    assert_eq!(
        handle_command("/code   letmein  "),
        CommandResult::SetAccessCode("letmein".into())
    );
}

#[test]
fn test_commands_without_argument_show_usage() {
    for cmd in ["/name", "/email", "/code", "/file", "/search", "/image"] {
        match handle_command(cmd) {
            CommandResult::Message(msg) => assert!(msg.starts_with("Usage:"), "{cmd}: {msg}"),
            other => panic!("{cmd} returned {other:?}"),
        }
    }
}

// --- STAGED TOOLS ---

#[test]
fn test_file_command_and_alias() {
    let expected = CommandResult::StageFile(PathBuf::from("docs/rubric.txt"));
    assert_eq!(handle_command("/file docs/rubric.txt"), expected);
    assert_eq!(handle_command("/upload docs/rubric.txt"), expected);
}

#[test]
fn test_search_command() {
    assert_eq!(
        handle_command("/search ai tutoring research"),
        CommandResult::StageSearch("ai tutoring research".into())
    );
}

#[test]
fn test_image_command() {
    assert_eq!(
        handle_command("/image a robot in a classroom"),
        CommandResult::StageImage("a robot in a classroom".into())
    );
}

#[test]
fn test_unstage_and_status() {
    assert_eq!(handle_command("/unstage"), CommandResult::Unstage);
    assert_eq!(handle_command("/status"), CommandResult::ShowStatus);
}

// --- THEMES ---

#[test]
fn test_theme_command_lists_themes() {
    match handle_command("/theme") {
        CommandResult::Message(msg) => {
            for name in Theme::all_names() {
                assert!(msg.contains(name));
            }
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_theme_command_with_name() {
    assert_eq!(
        handle_command("/theme paper"),
        CommandResult::ThemeChanged("paper".into())
    );
}

#[test]
fn test_theme_lookup_falls_back_to_dark() {
    assert_eq!(Theme::by_name("chalkboard").name, "chalkboard");
    assert_eq!(Theme::by_name("paper").name, "paper");
    assert_eq!(Theme::by_name("neon").name, "dark");
}

#[test]
fn test_role_colors_follow_theme() {
    let theme = Theme::paper();
    assert_eq!(theme.role_color(Role::User), theme.user_color);
    assert_eq!(theme.role_color(Role::Assistant), theme.assistant_color);
    assert_eq!(theme.role_color(Role::System), theme.notice_color);
    assert_ne!(Theme::dark().role_color(Role::User), theme.role_color(Role::User));
}

// --- NON-COMMANDS ---

#[test]
fn test_unknown_command() {
    match handle_command("/frobnicate") {
        CommandResult::Message(msg) => assert!(msg.contains("Unknown command: /frobnicate")),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_regular_input_is_not_a_command() {
    assert_eq!(
        handle_command("Should I use AI for report card comments?"),
        CommandResult::NotACommand
    );
    assert_eq!(handle_command(""), CommandResult::NotACommand);
}
