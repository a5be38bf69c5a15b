use crate::constants::{endpoints, limits, notices};
use crate::error::FitError;
use crate::tools::traits::{Fragment, FragmentSource, SearchProvider, ToolResult};
use serde::Deserialize;

/// SerpApi-compatible JSON search (`/search.json`).
pub struct SerpApiSearch {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SerpApiSearch {
    pub fn new(api_key: impl Into<String>) -> ToolResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(limits::SEARCH_TIMEOUT_SECS))
            .user_agent(concat!("FitCheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FitError::tool("web_search", format!("HTTP client error: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: endpoints::SERPAPI_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    snippet: Option<String>,
}

#[async_trait::async_trait]
impl SearchProvider for SerpApiSearch {
    fn name(&self) -> &str {
        "serpapi"
    }

    async fn search(&self, query: &str) -> ToolResult<Vec<String>> {
        let url = format!(
            "{}/search.json?engine=google&q={}&api_key={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key),
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FitError::tool("web_search", format!("Search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FitError::tool(
                "web_search",
                format!("Search API returned {status}"),
            ));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| FitError::tool("web_search", format!("Failed to parse response: {e}")))?;

        Ok(body
            .organic_results
            .into_iter()
            .filter_map(|r| r.snippet)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect())
    }
}

/// Turn a search outcome into a fragment. Failures become the fixed notice.
pub fn search_fragment(query: &str, outcome: ToolResult<Vec<String>>) -> Fragment {
    match outcome {
        Ok(snippets) => {
            let label = format!("Web search results for '{query}':");
            if snippets.is_empty() {
                return Fragment::labeled(FragmentSource::Search, label, notices::NO_SEARCH_RESULTS);
            }
            let body = snippets
                .iter()
                .take(limits::MAX_SEARCH_SNIPPETS)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("\n\n");
            Fragment::labeled(FragmentSource::Search, label, body)
        }
        Err(e) => {
            tracing::warn!("web search for {query:?} failed: {e}");
            Fragment::bare(FragmentSource::Search, notices::SEARCH_FAILED)
        }
    }
}
