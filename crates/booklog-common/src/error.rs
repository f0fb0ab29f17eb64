//! Error types and utilities for booklog

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for booklog operations
pub type Result<T> = std::result::Result<T, BooklogError>;

/// Main error type for booklog operations
#[derive(Error, Debug)]
pub enum BooklogError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network related errors (connection, timeout, body decoding)
    #[error("Network error: {message}")]
    Network {
        /// Human-readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Notion API returned an error response
    #[error("Notion API error: {message}")]
    Notion {
        /// Message from the Notion error envelope, or the HTTP status
        message: String,
        /// HTTP status code, when the error came from a response
        status_code: Option<u16>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Chart generation errors
    #[error("Graph error: {message}")]
    Graph {
        /// Human-readable description
        message: String,
    },

    /// A chart annotation points at a date the series does not cover
    #[error("Annotation '{label}' at {date} is outside the reading series")]
    AnnotationOutOfRange {
        /// Annotation text
        label: String,
        /// Annotation date
        date: NaiveDate,
    },
}

impl BooklogError {
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

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new Notion API error
    pub fn notion(msg: impl Into<String>) -> Self {
        Self::Notion {
            message: msg.into(),
            status_code: None,
        }
    }

    /// Create a new Notion API error with status code
    pub fn notion_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::Notion {
            message: msg.into(),
            status_code: Some(status),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
        }
    }

    /// Whether the error means the credentials were rejected
    pub const fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Notion {
                status_code: Some(401 | 403),
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let notion_error = BooklogError::notion_with_status("object_not_found", 404);
        assert!(notion_error.to_string().contains("Notion API error"));
        assert!(notion_error.to_string().contains("object_not_found"));

        let graph_error = BooklogError::graph("No reading data to draw");
        assert_eq!(graph_error.to_string(), "Graph error: No reading data to draw");
    }

    #[test]
    fn test_error_with_source() {
        let config_source_error = BooklogError::config_with_source(
            "Config loading failed",
            io::Error::new(io::ErrorKind::PermissionDenied, "Access denied"),
        );

        assert!(config_source_error.to_string().contains("Configuration error"));
        assert!(config_source_error.to_string().contains("Config loading failed"));
        assert!(config_source_error.source().is_some());

        let graph_error = BooklogError::graph("empty series");
        assert!(graph_error.source().is_none());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let booklog_error: BooklogError = io_error.into();

        assert!(booklog_error.to_string().contains("I/O error"));
        assert!(booklog_error.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_error =
            serde_json::from_str::<serde_json::Value>(r#"{"invalid": json}"#).unwrap_err();
        let booklog_error: BooklogError = serde_error.into();

        assert!(booklog_error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_annotation_error_display() {
        let error = BooklogError::AnnotationOutOfRange {
            label: "Coronavirus".to_string(),
            date: NaiveDate::from_ymd_opt(2020, 3, 10).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Annotation 'Coronavirus' at 2020-03-10 is outside the reading series"
        );
    }

    #[test]
    fn test_auth_failure_detection() {
        assert!(BooklogError::notion_with_status("unauthorized", 401).is_auth_failure());
        assert!(BooklogError::notion_with_status("restricted_resource", 403).is_auth_failure());
        assert!(!BooklogError::notion_with_status("rate_limited", 429).is_auth_failure());
        assert!(!BooklogError::notion("missing cursor").is_auth_failure());
    }
}
