mod conversation;
mod identity;
pub mod system_prompt;
pub mod transcript;

pub use conversation::Conversation;
pub use identity::Identity;
pub use system_prompt::{SystemPromptSource, DEFAULT_SYSTEM_PROMPT};
pub use transcript::{render_plain, TranscriptEntry};
