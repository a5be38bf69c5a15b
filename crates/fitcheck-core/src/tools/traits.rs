use crate::error::FitError;
use std::path::PathBuf;

pub type ToolResult<T> = Result<T, FitError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentSource {
    File,
    Search,
    Image,
}

/// Auxiliary text produced by one tool call, merged into the next user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub source: FragmentSource,
    pub label: Option<String>,
    pub body: String,
}

impl Fragment {
    pub fn labeled(source: FragmentSource, label: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            source,
            label: Some(label.into()),
            body: body.into(),
        }
    }

    pub fn bare(source: FragmentSource, body: impl Into<String>) -> Self {
        Self {
            source,
            label: None,
            body: body.into(),
        }
    }

    pub fn text(&self) -> String {
        match &self.label {
            Some(label) => format!("{label}\n{}", self.body),
            None => self.body.clone(),
        }
    }
}

/// A web search backend.
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Snippets of the results, in rank order. Results without a snippet are skipped.
    async fn search(&self, query: &str) -> ToolResult<Vec<String>>;
}

/// An image that was generated, fetched, and decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub prompt: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub path: Option<PathBuf>,
}

/// An image generation backend.
#[async_trait::async_trait]
pub trait ImageProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> ToolResult<GeneratedImage>;
}
