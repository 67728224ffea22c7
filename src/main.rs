use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use reqwest::Client;
use tracing_subscriber::EnvFilter;
use twitter_crawler::{write_records, Crawler, SearchOptions, TwitterCrawler};

#[derive(Parser)]
struct Args {
    /// Bearer token for the Twitter API
    #[arg(long = "bearer_token")]
    bearer_token: String,

    /// Keyword to search for
    #[arg(long)]
    keyword: String,

    /// Max number of tweets to return
    #[arg(long, default_value_t = 1)]
    limit: usize,

    /// Extra search parameters as comma-separated key=value pairs
    #[arg(long, value_parser = parse_kwargs)]
    kwargs: Option<BTreeMap<String, String>>,

    /// Output file path
    #[arg(long = "output_path", default_value = "output.json")]
    output_path: PathBuf,

    /// Search API base URL
    #[arg(long, default_value = "https://api.twitter.com")]
    endpoint: String,
}

fn parse_kwargs(s: &str) -> Result<BTreeMap<String, String>, String> {
    let mut extra = BTreeMap::new();
    for pair in s.split(',') {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got {:?}", pair))?;
        extra.insert(key.to_string(), value.to_string());
    }
    Ok(extra)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let client = match Client::builder().timeout(Duration::from_secs(10)).build() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let crawler = TwitterCrawler::builder()
        .client(&client)
        .bearer_token(args.bearer_token)
        .endpoint(args.endpoint)
        .build();

    let options = SearchOptions {
        limit: args.limit,
        extra: args.kwargs.unwrap_or_default(),
    };
    let tweets = match crawler.get_data_with_keyword(&args.keyword, options).await {
        Ok(tweets) => tweets,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("retrieved {} tweets for keyword {:?}", tweets.len(), args.keyword);

    if let Err(e) = write_records(&args.output_path, &tweets) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    tracing::info!("wrote {}", args.output_path.display());

    ExitCode::SUCCESS
}
