//! # upnpdig Description Fetching (`common::network::http`)
//!
//! File: cli/src/common/network/http.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Retrieves UPnP description documents over HTTP and hands back the parsed model
//! from `core::description`. This is the only place upnpdig talks HTTP.
//!
//! ## Architecture
//!
//! `DescriptionClient` owns one `reqwest::Client` configured from the `[http]`
//! configuration section. Each fetch follows the same pipeline:
//!
//! 1. GET the URL (transport failure → `UpnpdigError::Fetch`)
//! 2. Reject non-2xx responses (`UpnpdigError::HttpStatus`)
//! 3. Read the body and deserialize it with `quick-xml` (`UpnpdigError::Xml`)
//!
//! Proxies are disabled: description documents live on the local network.
//!
//! ## Usage
//!
//! ```rust
//! let client = DescriptionClient::new(&cfg.http)?;
//! let (description, base) = client.fetch_device_description("http://10.0.0.5:1400/desc.xml").await?;
//! ```
//!
use crate::core::{
    config::HttpConfig,
    description::{DeviceDescription, ServiceDescription},
    error::{Result, UpnpdigError},
};
use anyhow::Context;
use tracing::debug;
use url::Url;

/// HTTP client for device and service description documents.
#[derive(Debug, Clone)]
pub struct DescriptionClient {
    http: reqwest::Client,
}

impl DescriptionClient {
    /// Builds a client with the configured request timeout and user agent.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .no_proxy()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http })
    }

    /// Fetches and parses a device description.
    ///
    /// Returns the parsed document together with the URL it was actually retrieved
    /// from (after redirects). That URL is the base for resolving the document's
    /// relative references.
    pub async fn fetch_device_description(&self, url: &str) -> Result<(DeviceDescription, Url)> {
        let url = parse_url(url)?;
        let (body, final_url) = self.get_text(&url).await?;
        let description = DeviceDescription::from_xml(&body).map_err(|source| UpnpdigError::Xml {
            url: final_url.to_string(),
            source,
        })?;
        debug!(
            "Parsed device description '{}' ({} services, {} embedded devices)",
            description.device.friendly_name,
            description.device.services().len(),
            description.device.embedded_devices().len()
        );
        Ok((description, final_url))
    }

    /// Fetches and parses a service description (SCPD).
    pub async fn fetch_service_description(&self, url: &Url) -> Result<ServiceDescription> {
        let (body, final_url) = self.get_text(url).await?;
        let description = ServiceDescription::from_xml(&body).map_err(|source| UpnpdigError::Xml {
            url: final_url.to_string(),
            source,
        })?;
        debug!(
            "Parsed service description ({} state variables, {} actions)",
            description.state_variables().len(),
            description.actions().len()
        );
        Ok(description)
    }

    async fn get_text(&self, url: &Url) -> Result<(String, Url)> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| UpnpdigError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let final_url = response.url().clone();
        debug!("{} answered {}", final_url, status);
        if !status.is_success() {
            return Err(UpnpdigError::HttpStatus {
                url: final_url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.map_err(|source| UpnpdigError::Fetch {
            url: final_url.to_string(),
            source,
        })?;
        Ok((body, final_url))
    }
}

/// Parses a user- or device-supplied URL, mapping failures to `UpnpdigError::InvalidUrl`.
pub fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw)
        .map_err(|source| UpnpdigError::InvalidUrl {
            url: raw.to_string(),
            source,
        })
        .map_err(Into::into)
}
