/// Display name and email typed by the user. Neither is validated; they only
/// become a text prefix on each user message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn tag(&self) -> String {
        format!("User: {}, Email: {}", self.name, self.email)
    }

    /// Prefix `body` with the identity tag and a blank line.
    pub fn tagged(&self, body: &str) -> String {
        format!("{}\n\n{}", self.tag(), body)
    }
}
