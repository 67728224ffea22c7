use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single normalized search result.
///
/// Entity lists (`hashtags`, `mentions`, `urls`) carry the API's entity
/// objects through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    pub tweet_id: u64,
    pub user_id: u64,
    pub user_name: String,
    pub text: String,
    /// Creation time, `YYYY-MM-DD HH:MM:SS` in UTC.
    pub date: String,
    pub retweet_count: u64,
    pub favorite_count: u64,
    pub hashtags: Vec<Value>,
    pub mentions: Vec<Value>,
    pub urls: Vec<Value>,
}
