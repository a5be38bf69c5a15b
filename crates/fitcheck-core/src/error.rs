use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Tool error: {tool}: {message}")]
    Tool { tool: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Access code is missing or incorrect")]
    AccessDenied,

    #[error("Nothing to send: input is empty")]
    EmptyInput,

    #[error("Interaction log error: {0}")]
    Logger(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl FitError {
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

pub type Result<T, E = FitError> = std::result::Result<T, E>;
