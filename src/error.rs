// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for csrf-fetch
//!
//! Reading cookies and building headers never fails; every variant here
//! comes from dispatching a request through a transport.

use thiserror::Error;

/// Result type alias for csrf-fetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for csrf-fetch
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Header name or value cannot be sent on the wire
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Request mode forbids the target origin
    #[error("Cross-origin request to {url} blocked (origin {origin})")]
    CrossOrigin { url: String, origin: String },

    /// Redirect chain too long
    #[error("Too many redirects from {url} (limit {max})")]
    TooManyRedirects { url: String, max: usize },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, reason: impl ToString) -> Self {
        Error::InvalidHeader {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a cross-origin error
    pub fn cross_origin(url: impl Into<String>, origin: impl Into<String>) -> Self {
        Error::CrossOrigin {
            url: url.into(),
            origin: origin.into(),
        }
    }

    /// Check if this is a transport-level error
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Io(_))
    }

    /// Check if the request was rejected before anything was sent
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Error::Url(_) | Error::InvalidHeader { .. } | Error::CrossOrigin { .. }
        )
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Http(e) => e.url().map(|u| u.as_str()),
            Error::CrossOrigin { url, .. } => Some(url),
            Error::TooManyRedirects { url, .. } => Some(url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_origin_error() {
        let err = Error::cross_origin("https://evil.example/x", "https://app.example");

        assert!(err.is_request_error());
        assert!(!err.is_network());
        assert_eq!(err.url(), Some("https://evil.example/x"));
        assert_eq!(
            err.to_string(),
            "Cross-origin request to https://evil.example/x blocked (origin https://app.example)"
        );
    }

    #[test]
    fn test_url_error_is_request_error() {
        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert!(err.is_request_error());
        assert_eq!(err.url(), None);
    }

    #[test]
    fn test_invalid_header_message() {
        let err = Error::invalid_header("bad name", "invalid HTTP header name");
        assert_eq!(
            err.to_string(),
            "Invalid header 'bad name': invalid HTTP header name"
        );
    }
}
