mod api;
mod error;
mod tweet;

use std::collections::BTreeMap;
use std::path::Path;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use typed_builder::TypedBuilder;

use crate::api::SearchResponse;

pub use crate::error::CrawlerError;
pub use crate::tweet::Tweet;

/// Keyword-based retrieval against one external data source.
#[allow(async_fn_in_trait)]
pub trait Crawler {
    /// Retrieve up to `options.limit` records matching `keyword`, in the
    /// order the source returns them.
    async fn get_data_with_keyword(
        &self,
        keyword: &str,
        options: SearchOptions,
    ) -> Result<Vec<Tweet>, CrawlerError>;
}

/// Options for a single retrieval call.
///
/// `extra` is forwarded verbatim as query parameters (e.g. `lang`,
/// `result_type`, `since_id`). Which keys are recognized is the search API's
/// contract, not validated here.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub limit: usize,
    pub extra: BTreeMap<String, String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 1,
            extra: BTreeMap::new(),
        }
    }
}

/// Crawler for the Twitter v1.1 search API.
///
/// Construction does not validate the bearer token; an invalid credential
/// surfaces as an error on the first retrieval call.
#[derive(TypedBuilder)]
pub struct TwitterCrawler<'a> {
    client: &'a Client,

    #[builder(setter(into))]
    bearer_token: String,

    #[builder(setter(into), default = String::from("https://api.twitter.com"))]
    endpoint: String,
}

impl Crawler for TwitterCrawler<'_> {
    async fn get_data_with_keyword(
        &self,
        keyword: &str,
        options: SearchOptions,
    ) -> Result<Vec<Tweet>, CrawlerError> {
        let mut tweets = Vec::new();
        let mut cursor: Option<String> = None;

        while tweets.len() < options.limit {
            // Use cursor if it exists
            let get_params = match cursor {
                Some(ref c) => c.clone(),
                None => initial_query(keyword, options.limit, &options.extra),
            };

            let page = self.fetch_page(&get_params).await?;
            if page.statuses.is_empty() {
                break;
            }
            cursor = page.next_cursor();

            for status in page.statuses {
                if tweets.len() >= options.limit {
                    break;
                }
                tweets.push(status.into_tweet()?);
            }

            if cursor.is_none() {
                break;
            }
        }

        Ok(tweets)
    }
}

impl TwitterCrawler<'_> {
    async fn fetch_page(&self, get_params: &str) -> Result<SearchResponse, CrawlerError> {
        let url = format!("{}/1.1/search/tweets.json{}", self.endpoint, get_params);
        tracing::debug!("requesting {}", url);

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.bearer_token))
            .send()
            .await
            .map_err(|e| CrawlerError::Network(e.to_string()))?
            .error_for_status()
            .map_err(|e| CrawlerError::Network(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| CrawlerError::Parse(e.to_string()))
    }
}

fn initial_query(keyword: &str, limit: usize, extra: &BTreeMap<String, String>) -> String {
    let encoded = utf8_percent_encode(keyword, NON_ALPHANUMERIC);
    let mut get_params = format!("?q={}&count={}", encoded, limit.min(100));
    for (key, value) in extra {
        get_params.push('&');
        get_params.push_str(key);
        get_params.push('=');
        get_params.push_str(&utf8_percent_encode(value, NON_ALPHANUMERIC).to_string());
    }
    get_params
}

/// Write records to `path` as a single JSON array, overwriting any existing
/// file. Non-ASCII text is written literally, not escaped.
pub fn write_records(path: &Path, tweets: &[Tweet]) -> std::io::Result<()> {
    let json = serde_json::to_string(tweets)?;
    std::fs::write(path, json)
}
