/// FitCheck: centralized constants.
/// Limits, endpoints, and fixed strings live here.

// ─── Models ───────────────────────────────────────────────────────────────────

pub mod models {
    pub const DEFAULT_CHAT_MODEL: &str = "gpt-4";
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
    pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";
}

// ─── API Endpoints ────────────────────────────────────────────────────────────

pub mod endpoints {
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
    pub const SERPAPI_BASE_URL: &str = "https://serpapi.com";
    pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";
}

// ─── Environment variables holding secrets ────────────────────────────────────

pub mod env {
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const SERPAPI_API_KEY: &str = "SERPAPI_API_KEY";
    pub const ACCESS_CODE: &str = "FITCHECK_ACCESS_CODE";
    pub const SHEETS_TOKEN: &str = "FITCHECK_SHEETS_TOKEN";
}

// ─── Tool limits ──────────────────────────────────────────────────────────────

pub mod limits {
    /// Characters (not bytes) kept from an uploaded file.
    pub const FILE_EXCERPT_CHARS: usize = 1000;
    pub const MAX_SEARCH_SNIPPETS: usize = 5;
    pub const SEARCH_TIMEOUT_SECS: u64 = 15;
    pub const IMAGE_FETCH_TIMEOUT_SECS: u64 = 60;
}

// ─── Fixed user-visible text ──────────────────────────────────────────────────

pub mod notices {
    pub const SEARCH_FAILED: &str = "[Web search failed. No search results were added.]";
    pub const NO_SEARCH_RESULTS: &str = "No search results found.";
    pub const SEARCH_UNAVAILABLE: &str = "no search API key configured";
    pub const IMAGE_UNAVAILABLE: &str = "no image provider configured";
}

pub mod ui {
    pub const APP_TITLE: &str = "Should This Be AI?";
    pub const INTRO: &str = "Help evaluate whether and how AI might support your project, situation, or challenge.\n\
We'll ask clarifying questions and offer grounded recommendations. Sometimes the right answer is no AI at all.";
    pub const INPUT_PLACEHOLDER: &str = "Describe your project, challenge, or situation...";
}

pub mod paths {
    pub const APP_DIR: &str = "fitcheck";
    pub const CONFIG_FILE: &str = "config.toml";
    pub const IMAGE_DIR: &str = "images";
}
