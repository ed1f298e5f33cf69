use thiserror::Error;

/// The primary error type for the `miband2-auth` library.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("cipher input must be exactly 16 bytes, got {actual}")]
    InvalidInputSize { actual: usize },

    #[error("shared key must be exactly 16 bytes, got {actual}")]
    InvalidKeySize { actual: usize },

    #[error("ciphertext must be exactly 16 bytes, got {actual}")]
    InvalidCiphertextSize { actual: usize },

    #[error("malformed notification payload: expected at least {expected} bytes, got {actual}")]
    MalformedPayload { expected: usize, actual: usize },

    #[error("device rejected the shared key")]
    KeyRejected,

    #[error("device rejected the random number request")]
    RandomRejected,

    #[error("unexpected notification from the device")]
    ProtocolViolation,

    #[error("timed out waiting for an auth notification")]
    Timeout,

    #[error("authentication aborted by the caller")]
    Cancelled,

    #[error("transport error: {0}")]
    Transport(String),
}

impl From<tokio::time::error::Elapsed> for AuthError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        AuthError::Timeout
    }
}
