use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use fitcheck_core::{
    constants::ui,
    context::{render_plain, transcript},
    tools::GeneratedImage,
    AugmentRequest, FitError, Role, Session, TurnOutcome,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Terminal,
};
use std::io;

use crate::commands::{self, CommandResult};
use crate::staging::Staged;
use crate::theme::Theme;

// ── Single-prompt mode ──────────────────────────────────────────────────

pub async fn run_single_prompt(
    mut session: Session,
    prompt: &str,
    request: AugmentRequest,
) -> Result<()> {
    let outcome = session.submit(prompt, request).await?;

    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }
    for image in &outcome.images {
        eprintln!("[image] {}", describe_image(image));
    }

    println!("{}", render_plain(session.conversation()));
    Ok(())
}

// ── Interactive TUI ─────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq)]
enum NoteKind {
    Info,
    Warning,
    Error,
}

/// UI-only line shown between transcript messages. Never sent to the model.
#[derive(Clone)]
struct Note {
    /// Number of visible conversation messages when the note was added.
    anchor: usize,
    kind: NoteKind,
    text: String,
    timestamp: String,
}

enum Action {
    None,
    Submit(String),
}

struct AppState {
    // Input
    input: String,
    cursor_pos: usize,
    input_history: Vec<String>,
    history_pos: Option<usize>,

    // Transcript
    notes: Vec<Note>,
    scroll_offset: usize,

    // Turn
    staged: Staged,
    is_processing: bool,

    // Status
    status_text: String,
    total_tokens_in: u64,
    total_tokens_out: u64,

    should_quit: bool,
    theme: Theme,
}

impl AppState {
    fn new(theme_name: &str) -> Self {
        Self {
            input: String::new(),
            cursor_pos: 0,
            input_history: Vec::new(),
            history_pos: None,

            notes: Vec::new(),
            scroll_offset: 0,

            staged: Staged::default(),
            is_processing: false,

            status_text: "Ready".into(),
            total_tokens_in: 0,
            total_tokens_out: 0,

            should_quit: false,
            theme: Theme::by_name(theme_name),
        }
    }

    fn note(&mut self, session: &Session, kind: NoteKind, text: impl Into<String>) {
        self.notes.push(Note {
            anchor: session.conversation().visible().len(),
            kind,
            text: text.into(),
            timestamp: now_str(),
        });
        self.scroll_to_bottom();
    }

    fn scroll_to_bottom(&mut self) {
        // Will be resolved on next draw
        self.scroll_offset = usize::MAX;
    }

    fn push_history(&mut self, input: String) {
        if !input.is_empty() && self.input_history.last() != Some(&input) {
            self.input_history.push(input);
        }
        self.history_pos = None;
    }

    fn history_prev(&mut self) {
        if self.input_history.is_empty() {
            return;
        }
        let pos = match self.history_pos {
            None => self.input_history.len().saturating_sub(1),
            Some(0) => 0,
            Some(p) => p - 1,
        };
        self.history_pos = Some(pos);
        self.input = self.input_history[pos].clone();
        self.cursor_pos = self.input.len();
    }

    fn history_next(&mut self) {
        match self.history_pos {
            None => {}
            Some(pos) => {
                if pos + 1 >= self.input_history.len() {
                    self.history_pos = None;
                    self.input.clear();
                    self.cursor_pos = 0;
                } else {
                    self.history_pos = Some(pos + 1);
                    self.input = self.input_history[pos + 1].clone();
                    self.cursor_pos = self.input.len();
                }
            }
        }
    }
}

pub async fn run_tui(mut session: Session, theme_name: &str, staged: AugmentRequest) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = AppState::new(theme_name);
    state.staged = Staged::new(staged);

    state.note(&session, NoteKind::Info, format!("{}\n{}", ui::APP_TITLE, ui::INTRO));
    if !session.is_unlocked() {
        state.note(
            &session,
            NoteKind::Warning,
            "An access code is required. Enter it with /code <code>.",
        );
    }
    if session.identity().name.is_empty() || session.identity().email.is_empty() {
        state.note(
            &session,
            NoteKind::Info,
            "Tell us who you are with /name and /email. Type /help for commands.",
        );
    }

    let result = event_loop(&mut terminal, &mut state, &mut session).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    session: &mut Session,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw_ui(f, state, session))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Action::Submit(input) = handle_key(state, session, key) {
                    if !session.is_unlocked() {
                        state.note(
                            session,
                            NoteKind::Warning,
                            "Incorrect or missing access code. Enter it with /code <code>.",
                        );
                        continue;
                    }

                    state.is_processing = true;
                    state.status_text = "Thinking...".into();
                    state.scroll_to_bottom();
                    terminal.draw(|f| draw_ui(f, state, session))?;

                    let result = session.submit(&input, state.staged.for_submit()).await;
                    state.is_processing = false;
                    state.staged.settle(&result);
                    handle_turn_result(state, session, result);
                }
            }
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}

fn handle_turn_result(
    state: &mut AppState,
    session: &Session,
    result: std::result::Result<TurnOutcome, FitError>,
) {
    match result {
        Ok(outcome) => {
            for warning in &outcome.warnings {
                state.note(session, NoteKind::Warning, warning.clone());
            }
            for image in &outcome.images {
                state.note(session, NoteKind::Info, format!("Image: {}", describe_image(image)));
            }
            if let Some(usage) = outcome.usage {
                state.total_tokens_in += u64::from(usage.input_tokens);
                state.total_tokens_out += u64::from(usage.output_tokens);
            }
            tracing::debug!(turns = session.conversation().turns(), "turn complete");
            state.status_text = "Ready".into();
        }
        Err(FitError::AccessDenied) => {
            state.note(session, NoteKind::Warning, "Incorrect or missing access code.");
            state.status_text = "Locked".into();
        }
        Err(e) => {
            tracing::debug!("turn failed: {e}");
            state.note(session, NoteKind::Error, format!("Error: {e}"));
            if !state.staged.is_empty() {
                let msg = format!(
                    "Still staged for your next message: {}",
                    state.staged.summary()
                );
                state.note(session, NoteKind::Info, msg);
            }
            state.status_text = "Error".into();
        }
    }
    state.scroll_to_bottom();
}

fn handle_key(state: &mut AppState, session: &mut Session, key: KeyEvent) -> Action {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (KeyModifiers::CONTROL, KeyCode::Char('d')) => {
            state.should_quit = true;
        }

        (_, KeyCode::Enter) => {
            if state.input.trim().is_empty() || state.is_processing {
                return Action::None;
            }
            let input = std::mem::take(&mut state.input);
            state.cursor_pos = 0;
            state.push_history(input.clone());

            match commands::handle_command(&input) {
                CommandResult::NotACommand => return Action::Submit(input),
                result => handle_command_result(state, session, result),
            }
        }

        (_, KeyCode::Backspace) => {
            if let Some(prev) = prev_boundary(&state.input, state.cursor_pos) {
                state.input.remove(prev);
                state.cursor_pos = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if state.cursor_pos < state.input.len() {
                state.input.remove(state.cursor_pos);
            }
        }
        (_, KeyCode::Left) => {
            if let Some(prev) = prev_boundary(&state.input, state.cursor_pos) {
                state.cursor_pos = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(c) = state.input[state.cursor_pos..].chars().next() {
                state.cursor_pos += c.len_utf8();
            }
        }
        (_, KeyCode::Home) => state.cursor_pos = 0,
        (_, KeyCode::End) => state.cursor_pos = state.input.len(),
        (_, KeyCode::Up) => state.history_prev(),
        (_, KeyCode::Down) => state.history_next(),
        (_, KeyCode::PageUp) => {
            state.scroll_offset = state.scroll_offset.saturating_sub(10);
        }
        (_, KeyCode::PageDown) => {
            state.scroll_offset = state.scroll_offset.saturating_add(10);
        }
        (_, KeyCode::Esc) => {
            state.input.clear();
            state.cursor_pos = 0;
        }
        (modifiers, KeyCode::Char(c)) if !modifiers.contains(KeyModifiers::CONTROL) => {
            state.input.insert(state.cursor_pos, c);
            state.cursor_pos += c.len_utf8();
        }
        _ => {}
    }
    Action::None
}

fn handle_command_result(state: &mut AppState, session: &mut Session, result: CommandResult) {
    match result {
        CommandResult::Message(msg) => state.note(session, NoteKind::Info, msg),
        CommandResult::Quit => state.should_quit = true,
        CommandResult::SetName(name) => {
            session.identity_mut().name = name;
            let msg = format!("Name set: {}", session.identity().name);
            state.note(session, NoteKind::Info, msg);
        }
        CommandResult::SetEmail(email) => {
            session.identity_mut().email = email;
            let msg = format!("Email set: {}", session.identity().email);
            state.note(session, NoteKind::Info, msg);
        }
        CommandResult::SetAccessCode(code) => {
            session.set_access_code(code);
            if session.is_unlocked() {
                state.status_text = "Ready".into();
                state.note(session, NoteKind::Info, "Access granted.");
            } else {
                state.status_text = "Locked".into();
                state.note(session, NoteKind::Warning, "Incorrect access code.");
            }
        }
        CommandResult::StageFile(path) => match state.staged.request.attach_file(&path) {
            Ok(upload) => {
                let msg = format!(
                    "Attached {} ({} bytes) to your next message.",
                    upload.name,
                    upload.bytes.len()
                );
                state.note(session, NoteKind::Info, msg);
            }
            Err(e) => state.note(session, NoteKind::Warning, e.to_string()),
        },
        CommandResult::StageSearch(query) => {
            let msg = if session.tools().has_search() {
                format!("Will search the web for '{query}' with your next message.")
            } else {
                format!("Will search for '{query}', but no search API key is configured.")
            };
            state.staged.request.search_query = Some(query);
            state.note(session, NoteKind::Info, msg);
        }
        CommandResult::StageImage(prompt) => {
            let msg = if session.tools().has_images() {
                format!("Will generate an image for '{prompt}' with your next message.")
            } else {
                format!("Will try to generate '{prompt}', but image generation is not configured.")
            };
            state.staged.request.image_prompt = Some(prompt);
            state.note(session, NoteKind::Info, msg);
        }
        CommandResult::Unstage => {
            state.staged = Staged::default();
            state.note(session, NoteKind::Info, "Cleared staged tools.");
        }
        CommandResult::ShowStatus => {
            let identity = session.identity();
            let staged = state.staged.summary();
            let msg = format!(
                "Model: {}\nUser: {} <{}>\nAccess: {}\nTurns: {}\nStaged: {}\nLogging: {}",
                session.model(),
                or_dash(&identity.name),
                or_dash(&identity.email),
                if session.is_unlocked() { "granted" } else { "locked" },
                session.conversation().turns(),
                if staged.is_empty() { "-".to_string() } else { staged },
                if session.has_logger() { "on" } else { "off" },
            );
            state.note(session, NoteKind::Info, msg);
        }
        CommandResult::ThemeChanged(name) => {
            state.theme = Theme::by_name(&name);
            let msg = format!("Theme: {}", state.theme.name);
            state.note(session, NoteKind::Info, msg);
        }
        CommandResult::NotACommand => {}
    }
}

// ── Drawing ─────────────────────────────────────────────────────────────

fn draw_ui(f: &mut ratatui::Frame, state: &mut AppState, session: &Session) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // transcript
            Constraint::Length(3), // input
            Constraint::Length(1), // status
        ])
        .split(f.area());

    let chat_area = main_chunks[0];
    let theme = state.theme.clone();

    let chat_lines = build_chat_lines(session, &state.notes, state.is_processing, &theme);
    let total_lines = chat_lines.len();
    let visible_height = chat_area.height.saturating_sub(2) as usize;
    let max_scroll = total_lines.saturating_sub(visible_height);

    if state.scroll_offset == usize::MAX || state.scroll_offset > max_scroll {
        state.scroll_offset = max_scroll;
    }

    let title = format!(" {} ", ui::APP_TITLE);
    let chat = Paragraph::new(Text::from(chat_lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(theme.border)),
        )
        .wrap(Wrap { trim: false })
        .scroll((state.scroll_offset.min(u16::MAX as usize) as u16, 0));
    f.render_widget(chat, chat_area);

    if total_lines > visible_height {
        let mut scrollbar_state = ScrollbarState::new(max_scroll).position(state.scroll_offset);
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("^"))
                .end_symbol(Some("v")),
            chat_area,
            &mut scrollbar_state,
        );
    }

    draw_input(f, main_chunks[1], state, &theme);
    draw_status_bar(f, main_chunks[2], state, session, &theme);
}

fn render_message_lines<'a>(role: Role, content: &'a str, theme: &Theme) -> Vec<Line<'a>> {
    let prefix = match role {
        Role::User => "You > ",
        Role::Assistant => "AI > ",
        Role::System => "",
    };
    let color = theme.role_color(role);
    let indent = " ".repeat(prefix.len());

    content
        .lines()
        .enumerate()
        .map(|(i, raw_line)| {
            let lead = if i == 0 {
                Span::styled(prefix, Style::default().fg(color).add_modifier(Modifier::BOLD))
            } else {
                Span::raw(indent.clone())
            };
            Line::from(vec![lead, Span::styled(raw_line, Style::default().fg(color))])
        })
        .collect()
}

fn render_note_lines<'a>(note: &'a Note, theme: &Theme) -> Vec<Line<'a>> {
    let color = match note.kind {
        NoteKind::Info => theme.muted,
        NoteKind::Warning => theme.warning,
        NoteKind::Error => theme.error,
    };
    note.text
        .lines()
        .enumerate()
        .map(|(i, raw_line)| {
            let stamp = if i == 0 {
                format!("[{}] ", note.timestamp)
            } else {
                " ".repeat(note.timestamp.len() + 3)
            };
            Line::from(vec![
                Span::styled(stamp, Style::default().fg(theme.muted)),
                Span::styled(raw_line, Style::default().fg(color)),
            ])
        })
        .collect()
}

/// Transcript messages interleaved with UI notes at their anchors.
fn build_chat_lines<'a>(
    session: &'a Session,
    notes: &'a [Note],
    is_processing: bool,
    theme: &Theme,
) -> Vec<Line<'a>> {
    let entries = transcript::entries(session.conversation());
    let mut chat_lines: Vec<Line> = Vec::new();

    for position in 0..=entries.len() {
        for note in notes.iter().filter(|n| n.anchor == position) {
            chat_lines.extend(render_note_lines(note, theme));
            chat_lines.push(Line::raw(""));
        }
        if let Some(entry) = entries.get(position) {
            chat_lines.extend(render_message_lines(entry.role, entry.content, theme));
            chat_lines.push(Line::raw(""));
        }
    }

    if is_processing {
        chat_lines.push(Line::from(Span::styled(
            "  Thinking...",
            Style::default().fg(theme.accent).add_modifier(Modifier::DIM),
        )));
    }

    chat_lines
}

fn draw_input(f: &mut ratatui::Frame, area: Rect, state: &AppState, theme: &Theme) {
    let is_command = state.input.starts_with('/');
    let title = if state.is_processing {
        " Input (processing...) ".to_string()
    } else if is_command {
        " Command ".to_string()
    } else {
        format!(" {} ", ui::INPUT_PLACEHOLDER)
    };

    let input_style = if state.is_processing {
        Style::default().fg(theme.muted)
    } else {
        Style::default().fg(theme.fg)
    };

    let input = Paragraph::new(state.input.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(if is_command { theme.accent } else { theme.border })),
        )
        .style(input_style);
    f.render_widget(input, area);

    if !state.is_processing {
        let col = state.input[..state.cursor_pos].chars().count() as u16;
        let cursor_x = area.x + col + 1;
        let max_x = area.x + area.width.saturating_sub(2);
        f.set_cursor_position((cursor_x.min(max_x), area.y + 1));
    }
}

fn draw_status_bar(
    f: &mut ratatui::Frame,
    area: Rect,
    state: &AppState,
    session: &Session,
    theme: &Theme,
) {
    let identity = session.identity();
    let who = if identity.name.is_empty() {
        "anonymous".to_string()
    } else {
        identity.name.clone()
    };

    let tokens_str = if state.total_tokens_in > 0 || state.total_tokens_out > 0 {
        format!(
            "| {}in/{}out ",
            format_tokens(state.total_tokens_in),
            format_tokens(state.total_tokens_out),
        )
    } else {
        String::new()
    };

    let staged = state.staged.summary();
    let staged_str = if staged.is_empty() {
        String::new()
    } else {
        format!("| {staged} ")
    };

    let lock_str = if session.is_unlocked() { "" } else { "| locked " };

    let status_spans = vec![
        Span::styled(
            format!(" {} ", session.model()),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("| {who} "), Style::default().fg(theme.accent)),
        Span::styled(lock_str, Style::default().fg(theme.warning)),
        Span::styled(staged_str, Style::default().fg(theme.warning)),
        Span::styled(tokens_str, Style::default().fg(theme.muted)),
        Span::styled("| ", Style::default().fg(theme.muted)),
        Span::styled(state.status_text.clone(), Style::default().fg(theme.muted)),
    ];
    f.render_widget(Paragraph::new(Line::from(status_spans)), area);
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn describe_image(image: &GeneratedImage) -> String {
    match &image.path {
        Some(path) => format!(
            "{}x{} saved to {} ({})",
            image.width,
            image.height,
            path.display(),
            image.url
        ),
        None => format!("{}x{} at {}", image.width, image.height, image.url),
    }
}

fn prev_boundary(s: &str, pos: usize) -> Option<usize> {
    s[..pos].char_indices().next_back().map(|(i, _)| i)
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

fn format_tokens(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

fn now_str() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}
