use crate::config::WikipediaSettings;
use crate::tools::types::{Tool, ToolError};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

pub const WIKIPEDIA_NAME: &str = "wikipedia_search";
pub const WIKIPEDIA_DESCRIPTION: &str = "Useful for looking up general knowledge and topics.";

pub const NO_RESULT: &str = "No good Wikipedia Search Result was found";

const USER_AGENT: &str = concat!("mathsolver/", env!("CARGO_PKG_VERSION"));

/// Knowledge lookup against the MediaWiki API
pub struct WikipediaTool {
    http: reqwest::Client,
    settings: WikipediaSettings,
}

impl WikipediaTool {
    pub fn new(settings: WikipediaSettings) -> Result<Self, ToolError> {
        // Wikimedia rejects anonymous API clients
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http, settings })
    }

    /// Titles of the best matching pages
    async fn search(&self, query: &str) -> Result<Vec<String>, ToolError> {
        let limit = self.settings.top_k_results.to_string();
        let resp = self
            .http
            .get(&self.settings.api_url)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", limit.as_str()),
                ("format", "json"),
                ("formatversion", "2"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ToolError::Backend(format!("Wikipedia search returned {}", resp.status())));
        }

        let body: SearchResponse = resp.json().await?;
        Ok(body
            .query
            .map(|q| q.search.into_iter().map(|hit| hit.title).collect())
            .unwrap_or_default())
    }

    /// Plain-text intro of a page, if it exists
    async fn summary(&self, title: &str) -> Result<Option<String>, ToolError> {
        let resp = self
            .http
            .get(&self.settings.api_url)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", title),
                ("format", "json"),
                ("formatversion", "2"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ToolError::Backend(format!("Wikipedia page fetch returned {}", resp.status())));
        }

        let body: ExtractResponse = resp.json().await?;
        let extract = body
            .query
            .and_then(|q| q.pages.into_iter().find(|p| !p.missing))
            .and_then(|p| p.extract)
            .filter(|text| !text.trim().is_empty());
        Ok(extract)
    }
}

#[async_trait]
impl Tool for WikipediaTool {
    fn name(&self) -> &str {
        WIKIPEDIA_NAME
    }

    fn description(&self) -> &str {
        WIKIPEDIA_DESCRIPTION
    }

    async fn invoke(&self, query: &str) -> Result<String, ToolError> {
        let query: String = query.trim().chars().take(self.settings.max_query_chars).collect();
        if query.is_empty() {
            return Err(ToolError::InvalidInput("empty search query".to_string()));
        }

        let titles = self.search(&query).await?;
        debug!("Wikipedia search for {:?} returned {} titles", query, titles.len());

        let mut summaries = Vec::new();
        for title in titles {
            match self.summary(&title).await? {
                Some(extract) => summaries.push(format!("Page: {}\nSummary: {}", title, extract.trim())),
                None => warn!("Skipping Wikipedia page without an extract: {}", title),
            }
        }

        if summaries.is_empty() {
            return Ok(NO_RESULT.to_string());
        }

        Ok(summaries
            .join("\n\n")
            .chars()
            .take(self.settings.doc_content_chars_max)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    #[serde(default)]
    query: Option<ExtractQuery>,
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    extract: Option<String>,
}
