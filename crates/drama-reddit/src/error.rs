use thiserror::Error;

#[derive(Debug, Error)]
pub enum RedditError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token exchange failed with status {0}")]
    TokenExchange(u16),

    #[error("Reddit {endpoint} failed with status {status}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("submission {0} not found")]
    SubmissionNotFound(String),

    #[error("invalid Reddit URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
