use crate::constants::notices;
use crate::error::{FitError, Result};
use crate::tools::file_excerpt::{excerpt, FileUpload};
use crate::tools::image_gen::image_fragment;
use crate::tools::traits::{Fragment, GeneratedImage, ImageProvider, SearchProvider};
use crate::tools::web_search::search_fragment;
use std::path::Path;

/// Optional auxiliary inputs attached to one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AugmentRequest {
    pub upload: Option<FileUpload>,
    pub search_query: Option<String>,
    pub image_prompt: Option<String>,
}

impl AugmentRequest {
    /// Read `path` and stage it as the upload. On a read failure the error is
    /// returned and any previously staged upload is left in place.
    pub fn attach_file(&mut self, path: &Path) -> Result<&FileUpload> {
        let upload = FileUpload::from_path(path)?;
        Ok(self.upload.insert(upload))
    }

    pub fn is_empty(&self) -> bool {
        self.upload.is_none()
            && non_blank(self.search_query.as_deref()).is_none()
            && non_blank(self.image_prompt.as_deref()).is_none()
    }
}

/// What the tools produced for one submission.
#[derive(Debug, Clone, Default)]
pub struct Augmentation {
    pub fragments: Vec<Fragment>,
    pub images: Vec<GeneratedImage>,
    /// Failures to show inline; they never abort the turn.
    pub warnings: Vec<String>,
}

impl Augmentation {
    /// Append all fragments to `input`, blank-line separated.
    pub fn apply(&self, input: &str) -> String {
        if self.fragments.is_empty() {
            return input.to_string();
        }
        let merged = self
            .fragments
            .iter()
            .map(Fragment::text)
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("{input}\n\n{merged}")
    }
}

/// Runs the optional tools for a submission, one after another.
#[derive(Default)]
pub struct ToolPipeline {
    search: Option<Box<dyn SearchProvider>>,
    images: Option<Box<dyn ImageProvider>>,
}

impl ToolPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, provider: Box<dyn SearchProvider>) -> Self {
        self.search = Some(provider);
        self
    }

    pub fn with_images(mut self, provider: Box<dyn ImageProvider>) -> Self {
        self.images = Some(provider);
        self
    }

    pub fn has_search(&self) -> bool {
        self.search.is_some()
    }

    pub fn has_images(&self) -> bool {
        self.images.is_some()
    }

    pub async fn run(&self, request: &AugmentRequest) -> Augmentation {
        let mut out = Augmentation::default();

        if let Some(upload) = &request.upload {
            tracing::debug!(file = %upload.name, bytes = upload.bytes.len(), "adding file excerpt");
            out.fragments.push(excerpt(upload));
        }

        if let Some(query) = non_blank(request.search_query.as_deref()) {
            let outcome = match &self.search {
                Some(provider) => provider.search(query).await,
                None => Err(FitError::tool("web_search", notices::SEARCH_UNAVAILABLE)),
            };
            out.fragments.push(search_fragment(query, outcome));
        }

        if let Some(prompt) = non_blank(request.image_prompt.as_deref()) {
            let outcome = match &self.images {
                Some(provider) => provider.generate(prompt).await,
                None => Err(FitError::tool("generate_image", notices::IMAGE_UNAVAILABLE)),
            };
            match outcome {
                Ok(image) => {
                    out.fragments.push(image_fragment(&image));
                    out.images.push(image);
                }
                Err(e) => {
                    tracing::warn!("image generation for {prompt:?} failed: {e}");
                    out.warnings.push(format!("Image generation failed: {e}"));
                }
            }
        }

        out
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
