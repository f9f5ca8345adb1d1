use reqwest::StatusCode;

pub(crate) type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the transport layer.
///
/// `Network`, `Status` and `Decode` are transport failures; `Missing`
/// marks a well-formed response whose payload lacks an expected field.
/// The public [`crate::Client`] surface never raises these: every failure
/// is logged and degraded to an absent return value.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to send request: {0}")]
    Network(#[source] reqwest::Error),

    #[error("bucket error: {0}")]
    Status(StatusCode),

    #[error("error parsing bucket response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("bucket response is missing {0}")]
    Missing(&'static str),
}
