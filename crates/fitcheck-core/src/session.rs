use crate::context::{Conversation, Identity};
use crate::error::{FitError, Result};
use crate::gate::AccessGate;
use crate::llm::{LlmClient, Usage};
use crate::logger::{InteractionLogger, InteractionRow};
use crate::tools::{AugmentRequest, GeneratedImage, ToolPipeline};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingReply,
}

/// What one successful turn produced, besides the conversation update.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub reply: String,
    pub images: Vec<GeneratedImage>,
    pub warnings: Vec<String>,
    pub usage: Option<Usage>,
}

/// One interactive session: owns its conversation and runs turns against
/// the gate, the tools, the completion client, and the optional logger.
pub struct Session {
    llm: Box<dyn LlmClient>,
    tools: ToolPipeline,
    gate: AccessGate,
    logger: Option<Box<dyn InteractionLogger>>,
    conversation: Conversation,
    identity: Identity,
    access_code: Option<String>,
    state: SessionState,
}

impl Session {
    pub fn new(llm: Box<dyn LlmClient>, system_prompt: impl Into<String>) -> Self {
        Self {
            llm,
            tools: ToolPipeline::new(),
            gate: AccessGate::Open,
            logger: None,
            conversation: Conversation::new(system_prompt),
            identity: Identity::default(),
            access_code: None,
            state: SessionState::Idle,
        }
    }

    pub fn with_tools(mut self, tools: ToolPipeline) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_gate(mut self, gate: AccessGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_logger(mut self, logger: Box<dyn InteractionLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    pub fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Store the code presented by the user; it is checked on every submission.
    pub fn set_access_code(&mut self, code: impl Into<String>) {
        self.access_code = Some(code.into());
    }

    /// True if the stored code currently passes the gate.
    pub fn is_unlocked(&self) -> bool {
        self.gate.verify(self.access_code.as_deref()).is_ok()
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    pub fn tools(&self) -> &ToolPipeline {
        &self.tools
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn model(&self) -> &str {
        self.llm.model()
    }

    pub fn has_logger(&self) -> bool {
        self.logger.is_some()
    }

    /// Run one turn.
    ///
    /// Nothing is appended unless the gate passes and the input is non-blank.
    /// If the completion call fails the turn aborts: the user message stays
    /// recorded without a reply and the error is returned.
    pub async fn submit(&mut self, input: &str, request: AugmentRequest) -> Result<TurnOutcome> {
        if let Err(e) = self.gate.verify(self.access_code.as_deref()) {
            tracing::warn!("submission refused by access gate");
            return Err(e);
        }
        if input.trim().is_empty() {
            return Err(FitError::EmptyInput);
        }

        let augmentation = self.tools.run(&request).await;
        let content = self.identity.tagged(&augmentation.apply(input));

        self.conversation.add_user_message(content);
        self.state = SessionState::AwaitingReply;
        tracing::info!(
            turn = self.conversation.turns() + 1,
            fragments = augmentation.fragments.len(),
            "awaiting completion"
        );

        let response = match self.llm.chat(self.conversation.messages()).await {
            Ok(response) => response,
            Err(e) => {
                self.state = SessionState::Idle;
                tracing::error!("completion failed: {e}");
                return Err(e);
            }
        };

        let reply = response.message.content;
        self.conversation.add_assistant_message(reply.clone());
        self.state = SessionState::Idle;

        if let Some(logger) = &self.logger {
            let row = InteractionRow {
                name: self.identity.name.clone(),
                email: self.identity.email.clone(),
                input: input.to_string(),
            };
            logger.append(&row).await?;
        }

        Ok(TurnOutcome {
            reply,
            images: augmentation.images,
            warnings: augmentation.warnings,
            usage: response.usage,
        })
    }
}
