//! # upnpdig SSDP Discovery (`common::network::ssdp`)
//!
//! File: cli/src/common/network/ssdp.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Finds UPnP devices on the local network with a single SSDP `M-SEARCH` and
//! summarizes each one from its device description.
//!
//! ## Architecture
//!
//! Discovery acts as a control point only:
//!
//! - It binds an **ephemeral** UDP port (`0.0.0.0:0`) and never port 1900, so it cannot
//!   steal datagrams from an SSDP server running on the same host.
//! - One `M-SEARCH` is multicast to `239.255.255.250:1900`; unicast `HTTP/1.1 200 OK`
//!   replies are collected until the timeout elapses.
//! - Replies are reduced to their unique `LOCATION` headers, in arrival order.
//! - Every location's description is fetched concurrently. A device whose description
//!   cannot be fetched is logged and left out of the result.
//!
//! ## Usage
//!
//! ```rust
//! let devices = ssdp::discover_devices(&client, Duration::from_secs(3), "ssdp:all").await?;
//! for device in &devices {
//!     println!("{} at {}", device.friendly_name, device.location);
//! }
//! ```
//!
use crate::common::network::http::DescriptionClient;
use crate::core::{
    description::DeviceNode,
    error::{Result, UpnpdigError},
};
use std::{
    collections::HashMap,
    net::{Ipv4Addr, SocketAddr, SocketAddrV4},
    time::Duration,
};
use tokio::{net::UdpSocket, task::JoinSet, time::Instant};
use tracing::{debug, info, trace, warn};
use url::Url;

/// SSDP multicast group.
pub const SSDP_MULTICAST_ADDR: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);
/// SSDP port.
pub const SSDP_PORT: u16 = 1900;

/// What `upnpdig discover` reports for each device found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSummary {
    pub friendly_name: String,
    pub manufacturer: String,
    pub model_name: String,
    pub model_description: String,
    pub serial_number: String,
    pub udn: String,
    /// Where the device description was retrieved from.
    pub location: Url,
}

impl DeviceSummary {
    pub fn from_device(device: &DeviceNode, location: Url) -> Self {
        Self {
            friendly_name: device.friendly_name.clone(),
            manufacturer: device.manufacturer.clone(),
            model_name: device.model_name.clone(),
            model_description: device.model_description.clone(),
            serial_number: device.serial_number.clone(),
            udn: device.udn.clone(),
            location,
        }
    }
}

/// The headers of an `M-SEARCH` reply that discovery cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
    pub location: String,
    pub search_target: Option<String>,
    pub usn: Option<String>,
    pub server: Option<String>,
}

/// Searches the local network and returns a summary of every device that answered.
pub async fn discover_devices(
    client: &DescriptionClient,
    timeout: Duration,
    search_target: &str,
) -> Result<Vec<DeviceSummary>> {
    let target = SocketAddr::V4(SocketAddrV4::new(SSDP_MULTICAST_ADDR, SSDP_PORT));
    let locations = search(target, timeout, search_target).await?;
    info!("{} unique device location(s) answered the search", locations.len());
    Ok(describe_locations(client, locations).await)
}

/// Sends one `M-SEARCH` to `target` and collects the unique `LOCATION`s of the
/// replies received before `timeout` elapses, in arrival order.
pub async fn search(target: SocketAddr, timeout: Duration, search_target: &str) -> Result<Vec<String>> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))
        .await
        .map_err(UpnpdigError::from)?;
    debug!("SSDP client bound to {:?}", socket.local_addr());

    let mx = timeout.as_secs().clamp(1, 5);
    let message = build_msearch(search_target, mx);
    socket
        .send_to(message.as_bytes(), target)
        .await
        .map_err(UpnpdigError::from)?;
    info!("M-SEARCH sent to {} (ST={}, MX={})", target, search_target, mx);

    let deadline = Instant::now() + timeout;
    let mut buf = [0u8; 8192];
    let mut locations: Vec<String> = Vec::new();
    loop {
        let received = match tokio::time::timeout_at(deadline, socket.recv_from(&mut buf)).await {
            Err(_elapsed) => break,
            Ok(received) => received,
        };
        let (len, from) = match received {
            Ok(packet) => packet,
            Err(e) => {
                warn!("SSDP receive failed, ending search early: {}", e);
                break;
            }
        };

        let data = String::from_utf8_lossy(&buf[..len]);
        match parse_search_response(&data) {
            Some(response) => {
                debug!("SSDP reply from {}: {:?}", from, response);
                if !locations.contains(&response.location) {
                    locations.push(response.location);
                }
            }
            None => trace!("Ignoring SSDP datagram from {}:\n{}", from, data),
        }
    }

    Ok(locations)
}

/// Builds an `M-SEARCH` request. `mx` is the maximum response delay in seconds.
pub fn build_msearch(search_target: &str, mx: u64) -> String {
    format!(
        "M-SEARCH * HTTP/1.1\r\n\
         HOST: {}:{}\r\n\
         MAN: \"ssdp:discover\"\r\n\
         MX: {}\r\n\
         ST: {}\r\n\
         USER-AGENT: upnpdig/{} UPnP/1.1\r\n\
         \r\n",
        SSDP_MULTICAST_ADDR,
        SSDP_PORT,
        mx,
        search_target,
        env!("CARGO_PKG_VERSION")
    )
}

/// Parses a unicast `M-SEARCH` reply. Returns `None` for anything else (including
/// `NOTIFY` announcements and other control points' searches) and for replies
/// without a `LOCATION` header.
pub fn parse_search_response(data: &str) -> Option<SearchResponse> {
    let mut lines = data.lines();
    let status_line = lines.next()?.trim().to_ascii_uppercase();
    if !(status_line.starts_with("HTTP/") && status_line.split_whitespace().nth(1) == Some("200")) {
        return None;
    }

    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_ascii_uppercase(), value.trim().to_string()))
        .collect();

    let location = headers.get("LOCATION").filter(|l| !l.is_empty())?.clone();
    Some(SearchResponse {
        location,
        search_target: headers.get("ST").cloned(),
        usn: headers.get("USN").cloned(),
        server: headers.get("SERVER").cloned(),
    })
}

/// Fetches every location's device description concurrently. Results keep the
/// order of `locations`; failures are logged and skipped.
async fn describe_locations(client: &DescriptionClient, locations: Vec<String>) -> Vec<DeviceSummary> {
    let mut tasks = JoinSet::new();
    for (index, location) in locations.into_iter().enumerate() {
        let client = client.clone();
        tasks.spawn(async move {
            let fetched = client.fetch_device_description(&location).await;
            (index, location, fetched)
        });
    }

    let mut summaries = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, _, Ok((description, url)))) => {
                summaries.push((index, DeviceSummary::from_device(&description.device, url)));
            }
            Ok((_, location, Err(e))) => warn!("Skipping device at {}: {:#}", location, e),
            Err(e) => warn!("Description fetch task failed: {}", e),
        }
    }

    summaries.sort_by_key(|(index, _)| *index);
    summaries.into_iter().map(|(_, summary)| summary).collect()
}
