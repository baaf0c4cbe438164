use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use super::SpreadsheetClient;
use crate::errors::ClientError;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

/// Google Sheets v4 values-append transport. Rows are appended with
/// INSERT_ROWS / USER_ENTERED, matching how the sheet consumers expect
/// dates and numbers to be coerced.
#[derive(Debug, Clone)]
pub struct SheetsApiClient {
    http: Client,
    base_url: String,
    access_token: Option<String>,
}

impl SheetsApiClient {
    pub fn new(http: Client, access_token: Option<String>) -> Self {
        Self {
            http,
            base_url: SHEETS_API_BASE.into(),
            access_token,
        }
    }

    pub fn with_base_url(
        http: Client,
        base_url: impl Into<String>,
        access_token: Option<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            access_token,
        }
    }
}

#[async_trait]
impl SpreadsheetClient for SheetsApiClient {
    async fn append_row(
        &self,
        sheet_id: &str,
        range: &str,
        row: &[String],
    ) -> Result<(), ClientError> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}:append",
            self.base_url, sheet_id, range
        );
        let body = json!({ "values": [row] });

        let mut req = self
            .http
            .post(&url)
            .query(&[
                ("insertDataOption", "INSERT_ROWS"),
                ("valueInputOption", "USER_ENTERED"),
            ])
            .json(&body);
        if let Some(token) = &self.access_token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, detail });
        }
        Ok(())
    }
}
