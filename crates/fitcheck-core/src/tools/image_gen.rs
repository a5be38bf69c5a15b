use crate::constants::{endpoints, limits, models};
use crate::error::FitError;
use crate::tools::traits::{Fragment, FragmentSource, GeneratedImage, ImageProvider, ToolResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// OpenAI-compatible `/v1/images/generations` client. The returned URL is
/// fetched and decoded so a broken link fails here rather than in the UI.
pub struct OpenAIImageClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    size: String,
    base_url: String,
    output_dir: Option<PathBuf>,
}

impl OpenAIImageClient {
    pub fn new(api_key: impl Into<String>) -> ToolResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(limits::IMAGE_FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| FitError::tool("generate_image", format!("HTTP client error: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: models::DEFAULT_IMAGE_MODEL.to_string(),
            size: models::DEFAULT_IMAGE_SIZE.to_string(),
            base_url: endpoints::OPENAI_BASE_URL.to_string(),
            output_dir: None,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Save decoded images as PNG under `dir`.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    async fn request_url(&self, prompt: &str) -> ToolResult<String> {
        let url = format!("{}/v1/images/generations", self.base_url);
        let body = ImageRequest {
            model: &self.model,
            prompt,
            n: 1,
            size: &self.size,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| FitError::tool("generate_image", format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(FitError::tool(
                "generate_image",
                format!("Image API error ({status}): {text}"),
            ));
        }

        let parsed: ImageResponse = response.json().await.map_err(|e| {
            FitError::tool("generate_image", format!("Failed to parse response: {e}"))
        })?;

        parsed
            .data
            .into_iter()
            .find_map(|d| d.url)
            .ok_or_else(|| FitError::tool("generate_image", "Response contained no image URL"))
    }

    async fn fetch(&self, url: &str) -> ToolResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FitError::tool("generate_image", format!("Image download failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FitError::tool(
                "generate_image",
                format!("Image download returned {status}"),
            ));
        }

        let bytes = response.bytes().await.map_err(|e| {
            FitError::tool("generate_image", format!("Failed reading image bytes: {e}"))
        })?;
        Ok(bytes.to_vec())
    }
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

#[async_trait::async_trait]
impl ImageProvider for OpenAIImageClient {
    fn name(&self) -> &str {
        "openai-images"
    }

    async fn generate(&self, prompt: &str) -> ToolResult<GeneratedImage> {
        let url = self.request_url(prompt).await?;
        let bytes = self.fetch(&url).await?;
        let decoded = image::load_from_memory(&bytes)?;

        let path = match &self.output_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                let path = dir.join(format!("fitcheck-{}.png", uuid::Uuid::new_v4()));
                decoded.save_with_format(&path, image::ImageFormat::Png)?;
                Some(path)
            }
            None => None,
        };

        Ok(GeneratedImage {
            prompt: prompt.to_string(),
            url,
            width: decoded.width(),
            height: decoded.height(),
            path,
        })
    }
}

/// One-line description merged into the user message. Line breaks in the
/// prompt are collapsed to single spaces.
pub fn image_fragment(image: &GeneratedImage) -> Fragment {
    let prompt = image
        .prompt
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Fragment::bare(
        FragmentSource::Image,
        format!("[Generated image for prompt: '{prompt}']"),
    )
}
