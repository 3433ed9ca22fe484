use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::{Client, Request};
use scraper::Html;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::domain::place::Coordinate;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageSummary {
    pub title: String,
    pub extract: Option<String>,
    #[serde(default)]
    pub coordinates: Vec<Coordinate>,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Read access to an encyclopedia: top search hit and a page's intro extract.
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    async fn top_search_hit(&self, query: &str) -> Result<Option<SearchHit>, LookupError>;
    async fn page_summary(&self, title: &str) -> Result<Option<PageSummary>, LookupError>;
}

pub struct WikipediaClient {
    client: Client,
    api_url: Url,
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    action: &'static str,
    format: &'static str,
    list: &'static str,
    srsearch: &'a str,
    srlimit: u8,
    origin: &'static str,
}

#[derive(Serialize)]
struct PageQuery<'a> {
    action: &'static str,
    format: &'static str,
    titles: &'a str,
    prop: &'static str,
    exintro: u8,
    explaintext: u8,
    origin: &'static str,
}

#[derive(Deserialize)]
struct SearchResponse {
    query: Option<SearchResults>,
}

#[derive(Deserialize)]
struct SearchResults {
    search: Option<Vec<SearchHit>>,
}

#[derive(Deserialize)]
struct PageResponse {
    query: Option<PageResults>,
}

#[derive(Deserialize)]
struct PageResults {
    pages: Option<BTreeMap<String, PageSummary>>,
}

impl WikipediaClient {
    pub fn new(api_url: &str) -> anyhow::Result<Self> {
        // Wikimedia rejects anonymous clients without a descriptive user agent
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(WikipediaClient {
            client,
            api_url: Url::parse(api_url)?,
        })
    }

    fn search_request(&self, query: &str) -> reqwest::Result<Request> {
        self.client
            .get(self.api_url.clone())
            .query(&SearchQuery {
                action: "query",
                format: "json",
                list: "search",
                srsearch: query,
                srlimit: 1,
                origin: "*",
            })
            .build()
    }

    fn page_request(&self, title: &str) -> reqwest::Result<Request> {
        self.client
            .get(self.api_url.clone())
            .query(&PageQuery {
                action: "query",
                format: "json",
                titles: title,
                prop: "extracts|coordinates",
                exintro: 1,
                explaintext: 1,
                origin: "*",
            })
            .build()
    }

    async fn get_json<T>(&self, request: reqwest::Result<Request>) -> Result<T, LookupError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let transport = |e: reqwest::Error| LookupError::Transport(e.to_string());
        let res = self
            .client
            .execute(request.map_err(transport)?)
            .await
            .map_err(transport)?;

        if !res.status().is_success() {
            return Err(LookupError::Status(res.status().as_u16()));
        }

        res.json::<T>()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PlaceLookup for WikipediaClient {
    async fn top_search_hit(&self, query: &str) -> Result<Option<SearchHit>, LookupError> {
        let response: SearchResponse = self.get_json(self.search_request(query)).await?;

        Ok(response
            .query
            .and_then(|q| q.search)
            .and_then(|hits| hits.into_iter().next()))
    }

    async fn page_summary(&self, title: &str) -> Result<Option<PageSummary>, LookupError> {
        let response: PageResponse = self.get_json(self.page_request(title)).await?;

        Ok(response
            .query
            .and_then(|q| q.pages)
            .and_then(|pages| pages.into_values().next()))
    }
}

/// Search snippets carry `<span class="searchmatch">` highlighting and HTML entities.
pub fn strip_markup(html: &str) -> String {
    Html::parse_fragment(html)
        .root_element()
        .text()
        .collect::<String>()
}
