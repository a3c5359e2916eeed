use thiserror::Error;

/// Reasons an inbound notification cannot be turned into a request.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Malformed push envelope: {0}")]
    MalformedEnvelope(String),

    #[error("Message data is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Message data is not valid UTF-8")]
    InvalidUtf8,

    #[error("Message data is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid message payload")]
    MissingName,

    #[error("Invalid file name: {0:?}")]
    InvalidName(String),
}
