//! Error types for the Lob API client.
//!
//! # Design
//! Every failure surfaces as one `Error` value; nothing is retried or
//! swallowed inside the client. Callers that need to branch on the failure
//! class use `Error::kind()` instead of matching on payloads.
//!
//! 404 and 500 responses are reported as `Api` errors with an empty message:
//! their bodies are never parsed.

use thiserror::Error;

/// A specialized `Result` type for Lob client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by `LobClient` and the resource services.
#[derive(Error, Debug)]
pub enum Error {
    /// A relative path (or configured base URL) could not be resolved.
    #[error("malformed url: {0}")]
    MalformedUrl(#[from] url::ParseError),

    /// The request never produced a response, or the body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// The server answered with a status other than 200.
    #[error("{status} {message}")]
    Api { status: u16, message: String },

    /// A response body (success or error envelope) was not valid JSON for
    /// the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request payload could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// The server acknowledged a delete but reported `deleted: false`.
    #[error("address {id} was not deleted")]
    DeletionFailed { id: String },

    /// Missing or invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Failure class of an [`Error`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedUrl,
    Transport,
    Api,
    Decode,
    Encode,
    DeletionFailed,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedUrl(_) => ErrorKind::MalformedUrl,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Api { .. } => ErrorKind::Api,
            Error::Decode(_) => ErrorKind::Decode,
            Error::Encode(_) => ErrorKind::Encode,
            Error::DeletionFailed { .. } => ErrorKind::DeletionFailed,
            Error::Config(_) => ErrorKind::Config,
        }
    }

    /// HTTP status carried by an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_status_then_message() {
        let err = Error::Api {
            status: 422,
            message: "Invalid zip".to_string(),
        };
        assert_eq!(err.to_string(), "422 Invalid zip");
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn deletion_failed_names_the_address() {
        let err = Error::DeletionFailed {
            id: "adr_1".to_string(),
        };
        assert_eq!(err.to_string(), "address adr_1 was not deleted");
        assert_eq!(err.kind(), ErrorKind::DeletionFailed);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn url_parse_error_converts_to_malformed_url() {
        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::MalformedUrl);
    }

    #[test]
    fn json_error_converts_to_decode() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
