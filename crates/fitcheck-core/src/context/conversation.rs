use crate::llm::{Message, Role};

/// The ordered message sequence for one session.
///
/// Index 0 is always the system prompt. The only mutation is appending a
/// user or assistant message, so the system message can never be edited or
/// displaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.messages[0].content
    }

    /// Every message in send order, system prompt first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages after the system prompt.
    pub fn visible(&self) -> &[Message] {
        &self.messages[1..]
    }

    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Total messages including the system prompt.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when nothing but the system prompt is present.
    pub fn is_empty(&self) -> bool {
        self.messages.len() == 1
    }

    /// Completed user/assistant exchanges.
    pub fn turns(&self) -> usize {
        self.visible()
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .count()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.visible().last()
    }
}
