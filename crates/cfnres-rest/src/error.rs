use cfnres_core::ResourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing resource property: {0}")]
    MissingProperty(String),

    #[error("Resource path resolves outside the base URL: {0}")]
    PathOutsideBase(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{method} {url} returned HTTP {status}: {body}")]
    UnexpectedStatus {
        method: String,
        url: String,
        status: u16,
        body: String,
    },
}

impl RestError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

impl From<RestError> for ResourceError {
    fn from(error: RestError) -> Self {
        ResourceError::failed(error.to_string())
    }
}
