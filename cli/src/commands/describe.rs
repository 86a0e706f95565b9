//! # upnpdig Describe Command
//!
//! File: cli/src/commands/describe.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `upnpdig describe`: shows the properties of a UPnP device tree, or the
//! state variables and actions of one of its services.
//!
//! ## Workflow
//!
//! 1. Fetch the root device description from `--device` (or the configured default).
//! 2. Without `--service`: render the whole device tree.
//! 3. With `--service <ID>`: locate the service anywhere in the tree, resolve its SCPD URL
//!    against the URL the root description came from, fetch the SCPD and render it.
//!
//! ## Examples
//!
//! ```bash
//! # Whole device tree
//! upnpdig describe -d http://192.168.1.20:1400/xml/device_description.xml
//!
//! # One service, possibly on an embedded device
//! upnpdig describe -d http://192.168.1.20:1400/xml/device_description.xml \
//!     -s urn:upnp-org:serviceId:RenderingControl
//! ```
//!
use crate::{
    common::{network::http::DescriptionClient, ui},
    core::{
        config,
        error::Result,
        render,
        resolver::{self, TracingSink},
    },
};
use anyhow::Context;
use clap::Parser;
use std::io::Write;
use tracing::{debug, info};

/// # Describe Arguments (`DescribeArgs`)
#[derive(Parser, Debug)]
#[command(
    about = "Describe UPnP devices and services on your network",
    long_about = "Shows the properties of a UPnP device and its embedded devices, or the\n\
                  state variables and actions of one service identified by its serviceId."
)]
pub struct DescribeArgs {
    /// Device description URL. Defaults to `describe.device_url` from the configuration
    /// (http://localhost:1400/device_description.xml unless overridden).
    #[arg(short, long)]
    pub device: Option<String>,

    /// ServiceId to describe. When omitted or empty, the whole device tree is shown.
    #[arg(short, long)]
    pub service: Option<String>,
}

/// # Handle Describe Command (`handle_describe`)
///
/// Loads the configuration, fetches the device description and writes the requested
/// report to stdout, aligned into columns.
///
/// ## Errors
///
/// Fails if configuration loading fails, if either document cannot be fetched or
/// parsed, or if the requested service is not found anywhere in the device tree.
pub async fn handle_describe(args: DescribeArgs) -> Result<()> {
    let cfg = config::load_config().context("Failed to load upnpdig configuration")?;
    let device_url = args.device.unwrap_or(cfg.describe.device_url.clone());
    let service_id = args.service.filter(|s| !s.is_empty());
    info!("Describing {} (service: {:?})", device_url, service_id);

    let client = DescriptionClient::new(&cfg.http)?;
    let (description, base) = client
        .fetch_device_description(&device_url)
        .await
        .context("Failed to get device description")?;

    let mut out = ui::table_writer(std::io::stdout());
    match service_id {
        None => {
            render::render_device(&mut out, &description.device, "")
                .context("Failed to write device description")?;
        }
        Some(service_id) => {
            let location =
                resolver::resolve_service_location(&base, &description.device, &service_id, &mut TracingSink)?;
            debug!("Service '{}' description at {} (base {})", service_id, location.url, location.base);

            let service = client
                .fetch_service_description(&location.url)
                .await
                .context("Failed to get service description")?;
            render::render_service(&mut out, &service).context("Failed to write service description")?;
        }
    }
    out.flush().context("Failed to flush output")?;

    Ok(())
}
