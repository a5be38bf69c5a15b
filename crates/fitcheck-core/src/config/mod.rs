use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{endpoints, env, models, paths};
use crate::context::SystemPromptSource;
use crate::error::{FitError, Result};
use crate::gate::AccessGate;
use crate::llm::{LlmClient, OpenAIClient};
use crate::logger::{InteractionLogger, SheetsLogger};
use crate::session::Session;
use crate::tools::{OpenAIImageClient, SerpApiSearch, ToolPipeline};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub llm: LlmSettings,
    pub prompt: PromptSettings,
    pub access: AccessSettings,
    pub search: SearchSettings,
    pub image: ImageSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub model: String,
    pub temperature: f32,
    pub api_key_env: String,
    pub base_url: Option<String>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: models::DEFAULT_CHAT_MODEL.to_string(),
            temperature: models::DEFAULT_TEMPERATURE,
            api_key_env: env::OPENAI_API_KEY.to_string(),
            base_url: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptSettings {
    pub system_prompt: Option<String>,
    pub system_prompt_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessSettings {
    pub required: bool,
    pub code_env: String,
}

impl Default for AccessSettings {
    fn default() -> Self {
        Self {
            required: true,
            code_env: env::ACCESS_CODE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub enabled: bool,
    pub api_key_env: String,
    pub base_url: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: env::SERPAPI_API_KEY.to_string(),
            base_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    pub enabled: bool,
    pub model: String,
    pub size: String,
    /// Defaults to the LLM base URL.
    pub base_url: Option<String>,
    pub output_dir: Option<PathBuf>,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            model: models::DEFAULT_IMAGE_MODEL.to_string(),
            size: models::DEFAULT_IMAGE_SIZE.to_string(),
            base_url: None,
            output_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub enabled: bool,
    pub spreadsheet_id: String,
    pub range: String,
    pub token_env: String,
    pub base_url: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            spreadsheet_id: String::new(),
            range: "Sheet1!A:C".to_string(),
            token_env: env::SHEETS_TOKEN.to_string(),
            base_url: None,
        }
    }
}

/// Secret values, read once at startup from the environment variables the
/// settings name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Secrets {
    pub llm_api_key: Option<String>,
    pub search_api_key: Option<String>,
    pub access_code: Option<String>,
    pub sheets_token: Option<String>,
}

impl Secrets {
    pub fn from_env(settings: &Settings) -> Self {
        Self {
            llm_api_key: read_env(&settings.llm.api_key_env),
            search_api_key: read_env(&settings.search.api_key_env),
            access_code: read_env(&settings.access.code_env),
            sheets_token: read_env(&settings.logging.token_env),
        }
    }
}

fn read_env(name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(paths::APP_DIR)
            .join(paths::CONFIG_FILE)
    }

    /// Load the default config file, falling back to defaults if it is
    /// missing or unreadable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("ignoring {}: {e}", config_path.display()),
            }
        }
        Self::default()
    }

    /// Load an explicitly chosen config file; errors are reported.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| FitError::Config(format!("{}: {e}", path.display())))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| FitError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn llm_base_url(&self) -> &str {
        self.llm
            .base_url
            .as_deref()
            .unwrap_or(endpoints::OPENAI_BASE_URL)
    }

    pub fn image_output_dir(&self) -> PathBuf {
        self.image.output_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(paths::APP_DIR)
                .join(paths::IMAGE_DIR)
        })
    }

    pub fn system_prompt(&self) -> Result<String> {
        SystemPromptSource::from_options(
            self.prompt.system_prompt.as_deref(),
            self.prompt.system_prompt_file.as_ref(),
        )
        .resolve()
    }

    pub fn build_llm_client(&self, secrets: &Secrets) -> Result<Box<dyn LlmClient>> {
        let api_key = secrets.llm_api_key.clone().ok_or_else(|| {
            FitError::Config(format!(
                "No completion API key: set the {} environment variable",
                self.llm.api_key_env
            ))
        })?;

        Ok(Box::new(
            OpenAIClient::new(api_key)
                .with_model(&self.llm.model)
                .with_temperature(self.llm.temperature)
                .with_base_url(self.llm_base_url()),
        ))
    }

    /// Tools whose key is missing are left out; the pipeline reports them as
    /// unavailable when requested.
    pub fn build_tool_pipeline(&self, secrets: &Secrets) -> Result<ToolPipeline> {
        let mut pipeline = ToolPipeline::new();

        if self.search.enabled {
            match &secrets.search_api_key {
                Some(key) => {
                    let mut search = SerpApiSearch::new(key.clone())?;
                    if let Some(url) = &self.search.base_url {
                        search = search.with_base_url(url);
                    }
                    pipeline = pipeline.with_search(Box::new(search));
                }
                None => tracing::info!(
                    "web search disabled: {} is not set",
                    self.search.api_key_env
                ),
            }
        }

        if self.image.enabled {
            if let Some(key) = &secrets.llm_api_key {
                let base_url = self
                    .image
                    .base_url
                    .clone()
                    .unwrap_or_else(|| self.llm_base_url().to_string());
                let images = OpenAIImageClient::new(key.clone())?
                    .with_model(&self.image.model)
                    .with_size(&self.image.size)
                    .with_base_url(base_url)
                    .with_output_dir(self.image_output_dir());
                pipeline = pipeline.with_images(Box::new(images));
            }
        }

        Ok(pipeline)
    }

    pub fn build_gate(&self, secrets: &Secrets) -> AccessGate {
        AccessGate::from_secret(self.access.required, secrets.access_code.clone())
    }

    pub fn build_logger(&self, secrets: &Secrets) -> Result<Option<Box<dyn InteractionLogger>>> {
        if !self.logging.enabled {
            return Ok(None);
        }
        if self.logging.spreadsheet_id.is_empty() {
            return Err(FitError::Config(
                "logging.enabled is set but logging.spreadsheet_id is empty".into(),
            ));
        }
        let token = secrets.sheets_token.clone().ok_or_else(|| {
            FitError::Config(format!(
                "Interaction logging needs a token in {}",
                self.logging.token_env
            ))
        })?;

        let mut logger = SheetsLogger::new(&self.logging.spreadsheet_id, &self.logging.range, token);
        if let Some(url) = &self.logging.base_url {
            logger = logger.with_base_url(url);
        }
        Ok(Some(Box::new(logger)))
    }

    /// Assemble a ready-to-use session from these settings.
    pub fn build_session(&self, secrets: &Secrets) -> Result<Session> {
        let mut session = Session::new(self.build_llm_client(secrets)?, self.system_prompt()?)
            .with_tools(self.build_tool_pipeline(secrets)?)
            .with_gate(self.build_gate(secrets));
        if let Some(logger) = self.build_logger(secrets)? {
            session = session.with_logger(logger);
        }
        Ok(session)
    }
}
