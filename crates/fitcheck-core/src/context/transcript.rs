use crate::context::Conversation;
use crate::llm::Role;

/// One visible line item of the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptEntry<'a> {
    pub role: Role,
    pub content: &'a str,
}

/// Project the conversation for display, skipping the system prompt.
pub fn entries(conversation: &Conversation) -> Vec<TranscriptEntry<'_>> {
    conversation
        .visible()
        .iter()
        .map(|m| TranscriptEntry {
            role: m.role,
            content: m.content.as_str(),
        })
        .collect()
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "Advisor",
        Role::System => "System",
    }
}

/// Plain-text transcript, one block per message separated by blank lines.
pub fn render_plain(conversation: &Conversation) -> String {
    entries(conversation)
        .iter()
        .map(|e| format!("{}:\n{}", role_label(e.role), e.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}
