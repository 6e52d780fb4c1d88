use thiserror::Error;

/// Errors that can occur while fetching content or generating pages
#[derive(Error, Debug)]
pub enum SiteError {
    /// Failed to reach the content delivery API
    #[error("Failed to fetch content: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The content delivery API answered with a non-success status
    #[error("Content API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// An entry is missing a required field or has one of the wrong shape
    #[error("Malformed content in entry '{entry_id}': field '{field}' {reason}")]
    MalformedContent {
        entry_id: String,
        field: String,
        reason: String,
    },

    /// A required credential was not found in config or environment
    #[error("Missing credential: {0} not found in config or environment")]
    MissingCredential(&'static str),

    /// Error writing generated pages
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reading or writing JSON documents
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl SiteError {
    pub(crate) fn malformed(
        entry_id: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SiteError::MalformedContent {
            entry_id: entry_id.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}
