//! # upnpdig Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the application error types used throughout upnpdig.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `UpnpdigError`: A custom error enum using `thiserror` for the failures the
//!   collaborators (configuration, HTTP fetch, XML parsing, SSDP discovery) can raise.
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!   and context in command handlers.
//!
//! Service lookup failures have their own enum, `core::resolver::ResolveError`, because
//! the resolver distinguishes "not found" from "malformed reference" internally.
//!
//! ## Examples
//!
//! ```rust
//! let url = Url::parse(raw).map_err(|source| UpnpdigError::InvalidUrl {
//!     url: raw.to_string(),
//!     source,
//! })?;
//!
//! // Pattern matching on error types
//! match result {
//!     Err(e) if e.downcast_ref::<UpnpdigError>().map_or(false, |ue| matches!(ue, UpnpdigError::HttpStatus { .. })) => {
//!         println!("Device answered with an error status");
//!     }
//!     other => other?,
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the upnpdig application.
#[derive(Error, Debug)]
pub enum UpnpdigError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to fetch '{url}': {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Fetching '{url}' returned HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Malformed description document at '{url}': {source}")]
    Xml {
        url: String,
        #[source]
        source: quick_xml::DeError,
    },

    #[error("SSDP discovery failed: {source}")]
    Discovery {
        #[from]
        source: std::io::Error,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = UpnpdigError::Config("discover.timeout_secs must be greater than 0".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: discover.timeout_secs must be greater than 0"
        );

        let status = UpnpdigError::HttpStatus {
            url: "http://10.0.0.5:1400/desc.xml".into(),
            status: 404,
        };
        assert_eq!(
            status.to_string(),
            "Fetching 'http://10.0.0.5:1400/desc.xml' returned HTTP status 404"
        );

        let invalid = UpnpdigError::InvalidUrl {
            url: "not a url".into(),
            source: url::ParseError::RelativeUrlWithoutBase,
        };
        assert_eq!(
            invalid.to_string(),
            "Invalid URL 'not a url': relative URL without a base"
        );
    }

    #[test]
    fn test_io_error_converts_to_discovery() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrNotAvailable, "no route");
        let err: UpnpdigError = io.into();
        assert!(matches!(err, UpnpdigError::Discovery { .. }));
        assert_eq!(err.to_string(), "SSDP discovery failed: no route");
    }
}
