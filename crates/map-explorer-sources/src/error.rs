use thiserror::Error;
pub type Result<T> = std::result::Result<T, SourceError>;

#[derive(Error, Debug)]
pub enum SourceError {
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
    #[error("Endpoint cannot carry a path: {0}")]
    InvalidEndpoint(String),
    #[error("Malformed location: {0}")]
    MalformedLocation(String),
    #[error("Entity {0} missing from entity data response")]
    EntityNotFound(String),
}
