#[derive(thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("Invalid person name: {0}")]
    InvalidName(String),
    #[error("No video results found for query: {query}")]
    NotFound { query: String },
    #[error("YouTube API error: {0:#}")]
    Upstream(anyhow::Error),
    #[error("Failed to download and process audio: {0:#}")]
    DownloadProcessing(anyhow::Error),
    #[error("Invalid segment duration: must be at least one second")]
    EmptySegment,
    #[error(
        "Invalid segment duration: requested {requested_ms} ms but only {available_ms} ms available"
    )]
    InvalidDuration { requested_ms: u64, available_ms: u64 },
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Upstream(e) | Error::DownloadProcessing(e) => {
                writeln!(f, "{}\n", self)?;
                for cause in e.chain().skip(1) {
                    writeln!(f, "Caused by:\n\t{}", cause)?;
                }
                Ok(())
            }
            _ => writeln!(f, "{}", self),
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Configuration(e.to_string())
    }
}
