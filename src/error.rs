// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

/// Crate-wide error type.
///
/// Fetch failures carry enough detail for logging. What the user sees is
/// always the generic [`GENERIC_FETCH_ERROR`] message, see
/// [`Error::user_message`].
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("HTTP Error: {0}")]
    Http(String),

    #[error("Unexpected status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("API Error: {0}")]
    Api(String),

    #[error("Decode Error: {0}")]
    Decode(String),

    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),
}

/// Message shown for every failed gallery fetch. The HTTP status is
/// intentionally not surfaced.
pub const GENERIC_FETCH_ERROR: &str = "Failed to load gallery content. Please try again.";

impl Error {
    /// Returns the message to place in `GalleryState::error`.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        GENERIC_FETCH_ERROR
    }

    /// Returns true for errors that originate from a network fetch.
    #[must_use]
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Status { .. } | Error::Api(_) | Error::Decode(_)
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(err.to_string())
        } else {
            Error::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_status_error() {
        let err = Error::Status {
            status: 503,
            url: "http://localhost/api/projects/1/gallery".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Unexpected status 503 for http://localhost/api/projects/1/gallery"
        );
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn from_json_error_produces_decode_variant() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Decode(_)));
        assert!(err.is_fetch_error());
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
        assert!(!err.is_fetch_error());
    }

    #[test]
    fn user_message_discards_status() {
        let a = Error::Status {
            status: 404,
            url: "a".into(),
        };
        let b = Error::Http("connection reset".into());
        assert_eq!(a.user_message(), b.user_message());
        assert!(!a.user_message().contains("404"));
    }
}
