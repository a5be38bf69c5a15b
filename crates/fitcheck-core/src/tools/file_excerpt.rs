use crate::constants::limits::FILE_EXCERPT_CHARS;
use crate::error::FitError;
use crate::tools::traits::{Fragment, FragmentSource, ToolResult};
use std::path::Path;

/// Raw bytes of a user-supplied document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn from_path(path: &Path) -> ToolResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            FitError::tool("file", format!("Failed to read {}: {e}", path.display()))
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }
}

/// Decode lossily and keep the first `FILE_EXCERPT_CHARS` characters.
pub fn excerpt(upload: &FileUpload) -> Fragment {
    let text = String::from_utf8_lossy(&upload.bytes);
    let body: String = text.chars().take(FILE_EXCERPT_CHARS).collect();
    Fragment::labeled(
        FragmentSource::File,
        format!("Uploaded file '{}' (excerpt):", upload.name),
        body,
    )
}
