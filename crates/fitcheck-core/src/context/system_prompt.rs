use crate::error::{FitError, Result};
use std::path::PathBuf;

/// Advisor persona used when no prompt is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a curious, candid, and practical AI advisor helping users determine whether AI is a good fit for a specific idea or task. Ask clarifying questions as needed. If a proposal is vague or unrealistic, say so clearly. When making recommendations, explain tradeoffs, estimate effort, and flag privacy or ethical risks when relevant. You were designed for use by Multnomah Education Service District and should reflect that context in your responses.

The user has access to the following tools:
- summarize_text
- web_search
- generate_image

Based on the input, suggest which tool(s) would be most helpful and why. Then proceed to respond accordingly.";

/// Where the system prompt comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemPromptSource {
    Inline(String),
    File(PathBuf),
    BuiltIn,
}

impl SystemPromptSource {
    /// Inline text wins over a file; with neither, the built-in prompt is used.
    pub fn from_options(inline: Option<&str>, file: Option<&PathBuf>) -> Self {
        match (inline.map(str::trim).filter(|s| !s.is_empty()), file) {
            (Some(text), _) => Self::Inline(text.to_string()),
            (None, Some(path)) => Self::File(path.clone()),
            (None, None) => Self::BuiltIn,
        }
    }

    pub fn resolve(&self) -> Result<String> {
        match self {
            Self::Inline(text) => Ok(text.clone()),
            Self::BuiltIn => Ok(DEFAULT_SYSTEM_PROMPT.to_string()),
            Self::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    FitError::Config(format!(
                        "Failed to read system prompt file {}: {e}",
                        path.display()
                    ))
                })?;
                let text = text.trim();
                if text.is_empty() {
                    return Err(FitError::Config(format!(
                        "System prompt file {} is empty",
                        path.display()
                    )));
                }
                Ok(text.to_string())
            }
        }
    }
}
