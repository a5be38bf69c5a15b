pub mod error;
pub mod constants;
pub mod llm;
pub mod tools;
pub mod context;
pub mod config;
pub mod gate;
pub mod logger;
pub mod session;

// Re-export key types
pub use error::{FitError, Result};
pub use llm::{LlmClient, LlmResponse, Message, Role, Usage};
pub use tools::{AugmentRequest, Augmentation, FileUpload, Fragment, FragmentSource, ToolPipeline};
pub use context::{Conversation, Identity};
pub use config::{Secrets, Settings};
pub use gate::AccessGate;
pub use logger::{InteractionLogger, InteractionRow};
pub use session::{Session, SessionState, TurnOutcome};
