//! Error types and utilities for the Expo attendance pipeline

use thiserror::Error;

/// Result type alias for Expo operations
pub type Result<T> = std::result::Result<T, ExpoError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the scraping, charting and dashboard layers
#[derive(Error, Debug)]
pub enum ExpoError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network related errors, including non-success HTTP statuses
    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<BoxedSource>,
    },

    /// A table cell that should hold a number could not be parsed
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Chart generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Font discovery errors
    #[error("Font error: {message}")]
    Font {
        message: String,
        path: Option<String>,
    },
}

impl ExpoError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            status_code: None,
            source: None,
        }
    }

    /// Create a new network error for an unsuccessful HTTP status
    pub fn network_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::Network {
            message: msg.into(),
            status_code: Some(status),
            source: None,
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            status_code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new parse error with source
    pub fn parse_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new font error tied to a path
    pub fn font(msg: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Font {
            message: msg.into(),
            path: Some(path.into()),
        }
    }

    /// Whether this error came from the transport layer
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

/// Convert from reqwest::Error to ExpoError
impl From<reqwest::Error> for ExpoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err)
        } else if let Some(status) = err.status() {
            let code = status.as_u16();
            Self::Network {
                message: format!("HTTP error: {}", code),
                status_code: Some(code),
                source: Some(Box::new(err)),
            }
        } else {
            Self::network_with_source("Network request failed", err)
        }
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to ExpoError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for ExpoError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Chart rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let config_error = ExpoError::config("config issue");
        assert_eq!(config_error.to_string(), "Configuration error: config issue");

        let status_error = ExpoError::network_with_status("HTTP 503 for https://example.com", 503);
        assert!(status_error.is_network());
        assert!(status_error.to_string().contains("HTTP 503"));

        let font_error = ExpoError::font("no matching font", ".streamlit/fonts");
        assert_eq!(font_error.to_string(), "Font error: no matching font");
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let source = "abc".parse::<u64>().unwrap_err();
        let error = ExpoError::parse_with_source("invalid visitor count 'abc'", source);

        assert_eq!(error.to_string(), "Parse error: invalid visitor count 'abc'");
        assert!(error.source().is_some());
        assert!(!error.is_network());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let expo_error: ExpoError = io_error.into();

        assert!(expo_error.to_string().contains("I/O error"));
        assert!(expo_error.source().is_some());
    }

    #[test]
    fn test_error_chain_preservation() {
        let root_error = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle_error = ExpoError::config_with_source("Middle layer", root_error);
        let top_error = ExpoError::graph_with_source("Top layer", middle_error);

        let mut current_error: &dyn std::error::Error = &top_error;
        let mut depth = 0;
        while let Some(source) = current_error.source() {
            current_error = source;
            depth += 1;
        }

        assert_eq!(depth, 2);
    }
}
