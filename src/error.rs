#[derive(Debug)]
pub enum CrawlerError {
    Network(String),
    Parse(String),
}

impl std::fmt::Display for CrawlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(s) => write!(f, "unable to query search api: {}", s),
            Self::Parse(s) => write!(f, "unable to parse search response: {}", s),
        }
    }
}

impl std::error::Error for CrawlerError {}
