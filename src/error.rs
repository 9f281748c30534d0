use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Everything that can go wrong between a catalog operation and the upstream
/// services. Public operations never return this; it is logged and turned into
/// an empty result at the operation boundary.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status {
        url:    String,
        status: reqwest::StatusCode,
    },

    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url:    String,
        source: serde_path_to_error::Error<serde_json::Error>,
    },

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid author key format: {0:?}")]
    InvalidAuthorKey(String),

    #[error("Invalid work key format: {0:?}")]
    InvalidWorkKey(String),

    #[error("Required metadata missing for {item}: {field}")]
    MissingMetadata { item: String, field: &'static str },
}

impl CatalogError {
    pub fn missing_metadata(item: impl Into<String>, field: &'static str) -> Self {
        Self::MissingMetadata {
            item: item.into(),
            field,
        }
    }
}
