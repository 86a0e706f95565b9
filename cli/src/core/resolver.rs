//! # upnpdig Service Location Resolver
//!
//! File: cli/src/core/resolver.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Finds a service by its `serviceId` anywhere in a device description tree and
//! turns its `SCPDURL` into an absolute URL.
//!
//! ## Algorithm
//!
//! Depth-first, pre-order, self before children:
//!
//! 1. Scan the node's services in document order. The first service whose id matches
//!    is resolved against the root document URL and the search stops there (first match wins,
//!    duplicates later in document order are never returned).
//! 2. Otherwise recurse into each embedded device in document order. Every level uses the
//!    **root document URL** as its base: embedded devices have no retrieval location of their own.
//! 3. A subtree that fails with anything other than "not found" is reported to the
//!    [`DiagnosticSink`] and the search moves on to the next sibling.
//! 4. Nothing matched: [`ResolveError::NotFound`].
//!
//! A malformed `SCPDURL` on the matching service abandons that node's subtree (its own
//! embedded devices are not searched), the same way a failing sibling is abandoned.
//!
//! ## Usage
//!
//! ```rust
//! let mut sink = TracingSink;
//! let location = resolve_service_location(&base, &root, "urn:upnp-org:serviceId:AVTransport", &mut sink)?;
//! println!("{}", location.url);
//! ```
//!
use crate::core::description::{DeviceNode, ServiceRef};
use thiserror::Error;
use tracing::warn;
use url::Url;

/// Errors produced while locating a service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Service '{service_id}' not found")]
    NotFound { service_id: String },

    #[error("Cannot resolve SCPD URL '{scpd_url}' of service '{service_id}' against '{base}': {source}")]
    UrlResolution {
        service_id: String,
        scpd_url: String,
        base: String,
        #[source]
        source: url::ParseError,
    },
}

/// An absolute service description URL, plus the base it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub url: Url,
    pub base: Url,
}

/// Receives the non-fatal branch errors encountered during a search.
pub trait DiagnosticSink {
    fn report(&mut self, error: &ResolveError);
}

/// Sink that forwards every report to `tracing::warn!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, error: &ResolveError) {
        warn!("{}", error);
    }
}

impl DiagnosticSink for Vec<ResolveError> {
    fn report(&mut self, error: &ResolveError) {
        self.push(error.clone());
    }
}

/// Outcome of searching one subtree. Keeps "not here" apart from "broken here"
/// so the caller can decide which one to report.
#[derive(Debug)]
enum Lookup {
    Found(ResolvedLocation),
    NotFound,
    Failed(ResolveError),
}

/// Locates `service_id` in the tree rooted at `root` and resolves its SCPD URL
/// against `base` (the URL the root description document was retrieved from).
///
/// Returns [`ResolveError::NotFound`] when no usable match exists anywhere in the
/// tree. URL resolution failures are reported to `sink` and never returned.
pub fn resolve_service_location(
    base: &Url,
    root: &DeviceNode,
    service_id: &str,
    sink: &mut dyn DiagnosticSink,
) -> Result<ResolvedLocation, ResolveError> {
    match locate(base, root, service_id, sink) {
        Lookup::Found(location) => Ok(location),
        Lookup::NotFound => Err(not_found(service_id)),
        Lookup::Failed(error) => {
            sink.report(&error);
            Err(not_found(service_id))
        }
    }
}

fn locate(base: &Url, node: &DeviceNode, service_id: &str, sink: &mut dyn DiagnosticSink) -> Lookup {
    if let Some(service) = node.services().iter().find(|s| s.service_id == service_id) {
        return match resolve_scpd_url(base, service) {
            Ok(url) => Lookup::Found(ResolvedLocation {
                url,
                base: base.clone(),
            }),
            Err(error) => Lookup::Failed(error),
        };
    }

    for embedded in node.embedded_devices() {
        match locate(base, embedded, service_id, sink) {
            Lookup::Found(location) => return Lookup::Found(location),
            Lookup::NotFound => continue,
            Lookup::Failed(error) => sink.report(&error),
        }
    }

    Lookup::NotFound
}

/// Resolves a service's `SCPDURL` per RFC 3986: absolute references replace the base,
/// relative ones are merged with it.
fn resolve_scpd_url(base: &Url, service: &ServiceRef) -> Result<Url, ResolveError> {
    base.join(&service.scpd_url)
        .map_err(|source| ResolveError::UrlResolution {
            service_id: service.service_id.clone(),
            scpd_url: service.scpd_url.clone(),
            base: base.to_string(),
            source,
        })
}

fn not_found(service_id: &str) -> ResolveError {
    ResolveError::NotFound {
        service_id: service_id.to_string(),
    }
}
