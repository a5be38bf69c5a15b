use fitcheck_core::{AugmentRequest, FitError};

/// Tool inputs waiting for the next submission.
#[derive(Debug, Default)]
pub struct Staged {
    pub request: AugmentRequest,
}

impl Staged {
    pub fn new(request: AugmentRequest) -> Self {
        Self { request }
    }

    pub fn is_empty(&self) -> bool {
        self.request.is_empty()
    }

    /// Copy of the staged inputs for a submission. They stay staged until
    /// [`Staged::settle`] sees the outcome.
    pub fn for_submit(&self) -> AugmentRequest {
        self.request.clone()
    }

    /// Clear once the turn got a reply. A logger failure comes after the reply,
    /// so it clears too. Any other error keeps the inputs for a resend.
    pub fn settle<T>(&mut self, result: &Result<T, FitError>) {
        if matches!(result, Ok(_) | Err(FitError::Logger(_))) {
            self.request = AugmentRequest::default();
        }
    }

    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(upload) = &self.request.upload {
            parts.push(format!("file:{}", upload.name));
        }
        if let Some(q) = &self.request.search_query {
            parts.push(format!("search:{q}"));
        }
        if let Some(p) = &self.request.image_prompt {
            parts.push(format!("image:{p}"));
        }
        parts.join(" ")
    }
}
