//! Wire types for the v1.1 `search/tweets` endpoint and the mapping from a
//! raw status to a [`Tweet`].

use serde::Deserialize;
use serde_json::Value;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::error::CrawlerError;
use crate::tweet::Tweet;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub statuses: Vec<Status>,
    pub search_metadata: Option<SearchMetadata>,
}

impl SearchResponse {
    /// Raw query string for the next page, e.g. `?max_id=...&q=...`.
    pub fn next_cursor(&self) -> Option<String> {
        self.search_metadata
            .as_ref()
            .and_then(|m| m.next_results.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchMetadata {
    pub next_results: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Status {
    pub id: u64,
    pub text: String,
    pub created_at: String,
    pub user: StatusUser,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub favorite_count: u64,
    #[serde(default)]
    pub entities: Entities,
}

#[derive(Debug, Deserialize)]
pub struct StatusUser {
    pub id: u64,
    pub screen_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub hashtags: Vec<Value>,
    #[serde(default)]
    pub user_mentions: Vec<Value>,
    #[serde(default)]
    pub urls: Vec<Value>,
}

// v1.1 timestamps look like "Wed Oct 10 20:19:24 +0000 2018"
static CREATED_AT_FORMAT: &[FormatItem<'_>] = format_description!(
    "[weekday repr:short] [month repr:short] [day] [hour]:[minute]:[second] \
     [offset_hour sign:mandatory][offset_minute] [year]"
);
static DATE_FORMAT: &[FormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

impl Status {
    pub fn into_tweet(self) -> Result<Tweet, CrawlerError> {
        let created_at = OffsetDateTime::parse(&self.created_at, CREATED_AT_FORMAT)
            .map_err(|e| {
                CrawlerError::Parse(format!("bad created_at {:?}: {}", self.created_at, e))
            })?
            .to_offset(UtcOffset::UTC);
        let date = created_at
            .format(DATE_FORMAT)
            .map_err(|e| CrawlerError::Parse(e.to_string()))?;

        Ok(Tweet {
            tweet_id: self.id,
            user_id: self.user.id,
            user_name: self.user.screen_name,
            text: self.text,
            date,
            retweet_count: self.retweet_count,
            favorite_count: self.favorite_count,
            hashtags: self.entities.hashtags,
            mentions: self.entities.user_mentions,
            urls: self.entities.urls,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_status() -> Status {
        serde_json::from_value(json!({
            "id": 1050118621198921728u64,
            "text": "To make room for more expression",
            "created_at": "Wed Oct 10 20:19:24 +0000 2018",
            "user": {"id": 6253282, "screen_name": "TwitterAPI"},
            "retweet_count": 12,
            "favorite_count": 34,
            "entities": {
                "hashtags": [{"text": "api", "indices": [0, 4]}],
                "user_mentions": [],
                "urls": [{"url": "https://t.co/x", "expanded_url": "https://example.com"}]
            }
        }))
        .unwrap()
    }

    #[test]
    fn maps_all_fields() {
        let tweet = sample_status().into_tweet().unwrap();
        assert_eq!(tweet.tweet_id, 1050118621198921728);
        assert_eq!(tweet.user_id, 6253282);
        assert_eq!(tweet.user_name, "TwitterAPI");
        assert_eq!(tweet.text, "To make room for more expression");
        assert_eq!(tweet.date, "2018-10-10 20:19:24");
        assert_eq!(tweet.retweet_count, 12);
        assert_eq!(tweet.favorite_count, 34);
        assert_eq!(tweet.hashtags, vec![json!({"text": "api", "indices": [0, 4]})]);
        assert!(tweet.mentions.is_empty());
        assert_eq!(tweet.urls.len(), 1);
    }

    #[test]
    fn converts_offset_to_utc() {
        let mut status = sample_status();
        status.created_at = "Wed Oct 10 22:19:24 +0200 2018".to_string();
        let tweet = status.into_tweet().unwrap();
        assert_eq!(tweet.date, "2018-10-10 20:19:24");
    }

    #[test]
    fn rejects_bad_created_at() {
        let mut status = sample_status();
        status.created_at = "2018-10-10".to_string();
        assert!(matches!(
            status.into_tweet(),
            Err(CrawlerError::Parse(_))
        ));
    }

    #[test]
    fn missing_entities_default_to_empty() {
        let status: Status = serde_json::from_value(json!({
            "id": 1u64,
            "text": "hi",
            "created_at": "Mon Sep 24 03:35:21 +0000 2012",
            "user": {"id": 2, "screen_name": "someone"}
        }))
        .unwrap();
        let tweet = status.into_tweet().unwrap();
        assert!(tweet.hashtags.is_empty());
        assert!(tweet.mentions.is_empty());
        assert!(tweet.urls.is_empty());
        assert_eq!(tweet.retweet_count, 0);
    }
}
