use crate::error::{FitError, Result};

/// Plain equality check of a submitted code against a configured secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessGate {
    /// No code required.
    Open,
    /// Submissions must present exactly this code.
    Code(String),
    /// A code is required but none is configured; everything is refused.
    Locked,
}

impl AccessGate {
    /// Build from the secret read at startup. `required = false` disables the gate.
    pub fn from_secret(required: bool, secret: Option<String>) -> Self {
        if !required {
            return Self::Open;
        }
        match secret {
            Some(code) if !code.is_empty() => Self::Code(code),
            _ => Self::Locked,
        }
    }

    pub fn verify(&self, submitted: Option<&str>) -> Result<()> {
        match self {
            Self::Open => Ok(()),
            Self::Code(expected) if submitted == Some(expected.as_str()) => Ok(()),
            Self::Code(_) | Self::Locked => Err(FitError::AccessDenied),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}
