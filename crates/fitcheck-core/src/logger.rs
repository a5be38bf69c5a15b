use crate::constants::endpoints;
use crate::error::{FitError, Result};
use serde::Serialize;

/// One logged exchange: who asked, and exactly what they typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionRow {
    pub name: String,
    pub email: String,
    pub input: String,
}

impl InteractionRow {
    pub fn cells(&self) -> [&str; 3] {
        [&self.name, &self.email, &self.input]
    }
}

#[async_trait::async_trait]
pub trait InteractionLogger: Send + Sync {
    async fn append(&self, row: &InteractionRow) -> Result<()>;
}

/// Appends rows through the Google Sheets `values:append` endpoint.
pub struct SheetsLogger {
    client: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    range: String,
    token: String,
}

impl SheetsLogger {
    pub fn new(
        spreadsheet_id: impl Into<String>,
        range: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: endpoints::SHEETS_BASE_URL.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
            token: token.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn append_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}:append?valueInputOption=RAW",
            self.base_url,
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(&self.range),
        )
    }
}

#[async_trait::async_trait]
impl InteractionLogger for SheetsLogger {
    async fn append(&self, row: &InteractionRow) -> Result<()> {
        let body = serde_json::json!({ "values": [row.cells()] });

        let response = self
            .client
            .post(self.append_url())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| FitError::Logger(format!("Sheets request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(FitError::Logger(format!("Sheets append failed ({status}): {text}")));
        }

        tracing::debug!(range = %self.range, "logged interaction");
        Ok(())
    }
}
