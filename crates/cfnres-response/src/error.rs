use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Event has no ResponseURL")]
    MissingResponseUrl,

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Send failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Response rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}
