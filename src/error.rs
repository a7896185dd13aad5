use chrono::NaiveDate;
use thiserror::Error;

/// Library error type for gallery operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings that make acquisition impossible (bad year range, rover id, sizes).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Acquisition could not make any progress at all.
    #[error("acquisition failed")]
    Acquisition(#[source] Box<Error>),

    /// Building the HTTP client failed.
    #[error("http client setup failed: {0}")]
    Client(#[source] reqwest::Error),
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

/// One `(date, page)` request that did not yield photos.
///
/// Recovered by the orchestrator; only ever logged.
#[derive(Debug, Error)]
#[error("failed to fetch photos for {date} (page {page})")]
pub struct FetchFailure {
    pub date: NaiveDate,
    pub page: u32,
    #[source]
    pub cause: FetchCause,
}

#[derive(Debug, Error)]
pub enum FetchCause {
    /// The API answered with a non-2xx status.
    #[error("unexpected http status {0}")]
    Status(u16),

    /// Connection, TLS or timeout failure.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The body was not the expected JSON shape.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchFailure {
    pub fn new(date: NaiveDate, page: u32, cause: impl Into<FetchCause>) -> Self {
        Self {
            date,
            page,
            cause: cause.into(),
        }
    }
}
