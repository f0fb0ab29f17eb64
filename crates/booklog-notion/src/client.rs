//! Notion database client with cursor pagination
//!
//! The fetch stage has no retry logic: any transport, auth, or decoding
//! failure is returned to the caller and ends the run.

use crate::RawRecord;
use async_trait::async_trait;
use booklog_common::{BooklogError, Result};
use booklog_config::NotionConfig;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// One page of query results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryPage {
    /// Page objects on this result page
    #[serde(default)]
    pub results: Vec<RawRecord>,
    /// Whether another page follows
    #[serde(default)]
    pub has_more: bool,
    /// Cursor for the next page, present when `has_more` is set
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Anything that can serve database query pages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page starting at `cursor` (`None` for the first page).
    async fn query_page(&self, database_id: &str, cursor: Option<String>) -> Result<QueryPage>;
}

/// Error envelope Notion returns with non-2xx responses.
#[derive(Debug, Deserialize)]
struct NotionErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Notion API client
#[derive(Debug, Clone)]
pub struct NotionClient {
    client: Client,
    config: NotionConfig,
}

impl NotionClient {
    /// Create a new client from the `notion` configuration section
    pub fn new(config: NotionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| BooklogError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self { client, config })
    }

    /// Query endpoint for a database
    pub fn query_url(&self, database_id: &str) -> String {
        format!(
            "{}/databases/{}/query",
            self.config.api_url.trim_end_matches('/'),
            database_id
        )
    }
}

#[async_trait]
impl PageSource for NotionClient {
    #[instrument(skip(self))]
    async fn query_page(&self, database_id: &str, cursor: Option<String>) -> Result<QueryPage> {
        let url = self.query_url(database_id);
        debug!("Querying {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.token)
            .header("Notion-Version", self.config.api_version.as_str())
            .json(&query_body(self.config.page_size, cursor.as_deref()))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BooklogError::network_with_source("Failed to read response body", e))?;

        if !status.is_success() {
            error!(status = status.as_u16(), "Notion rejected the query");
            return Err(error_from_response(status.as_u16(), &text));
        }

        let page: QueryPage = serde_json::from_str(&text)?;
        debug!(
            records = page.results.len(),
            has_more = page.has_more,
            "Received result page"
        );
        Ok(page)
    }
}

/// Request body for one database query
pub fn query_body(page_size: u32, cursor: Option<&str>) -> Value {
    let mut body = json!({ "page_size": page_size });
    if let Some(cursor) = cursor {
        body["start_cursor"] = Value::String(cursor.to_string());
    }
    body
}

/// Turn a non-2xx response into an error, preferring Notion's own message
pub fn error_from_response(status: u16, body: &str) -> BooklogError {
    match serde_json::from_str::<NotionErrorBody>(body) {
        Ok(NotionErrorBody {
            code,
            message: Some(message),
        }) => {
            let message = match code {
                Some(code) => format!("{code}: {message}"),
                None => message,
            };
            BooklogError::notion_with_status(message, status)
        }
        _ => BooklogError::notion_with_status(format!("HTTP {status}"), status),
    }
}

fn transport_error(err: reqwest::Error) -> BooklogError {
    if err.is_timeout() {
        BooklogError::network_with_source("Request timeout", err)
    } else if err.is_connect() {
        BooklogError::network_with_source("Connection failed", err)
    } else {
        BooklogError::network_with_source("Request failed", err)
    }
}

/// Pull every result page of a database, following cursors until exhausted.
///
/// Pages are returned in fetch order, one inner vector per page, without
/// dedup or sorting.
#[instrument(skip(source))]
pub async fn fetch_all_pages<S>(source: &S, database_id: &str) -> Result<Vec<Vec<RawRecord>>>
where
    S: PageSource + ?Sized,
{
    let mut pages = Vec::new();
    let mut cursor = None;

    loop {
        let QueryPage {
            results,
            has_more,
            next_cursor,
        } = source.query_page(database_id, cursor.take()).await?;
        pages.push(results);

        if !has_more {
            break;
        }
        match next_cursor {
            Some(next) => cursor = Some(next),
            None => {
                return Err(BooklogError::notion(
                    "Response reported more results but carried no next_cursor",
                ))
            }
        }
    }

    let records: usize = pages.iter().map(Vec::len).sum();
    info!(pages = pages.len(), records, "Fetched reading log");
    Ok(pages)
}
