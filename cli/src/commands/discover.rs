//! # upnpdig Discover Command
//!
//! File: cli/src/commands/discover.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `upnpdig discover`: sends an SSDP search, waits for `--timeout` seconds,
//! then lists every device that answered with a few identity fields and the location
//! of its description (ready to pass to `upnpdig describe -d`).
//!
//! ```bash
//! upnpdig discover
//! upnpdig discover -t 5 --search-target upnp:rootdevice
//! ```
//!
use crate::{
    common::{
        network::{http::DescriptionClient, ssdp},
        ui,
    },
    core::{config, error::Result},
};
use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::time::Duration;
use tracing::info;

/// # Discover Arguments (`DiscoverArgs`)
#[derive(Parser, Debug)]
#[command(
    about = "Discover UPnP devices on your network",
    long_about = "Sends an SSDP M-SEARCH and lists the devices that answer within the timeout."
)]
pub struct DiscoverArgs {
    /// Discovery timeout in seconds. Defaults to `discover.timeout_secs` (3).
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// SSDP search target (ST header). Defaults to `discover.search_target` (ssdp:all).
    #[arg(long)]
    pub search_target: Option<String>,
}

/// # Handle Discover Command (`handle_discover`)
pub async fn handle_discover(args: DiscoverArgs) -> Result<()> {
    let cfg = config::load_config().context("Failed to load upnpdig configuration")?;
    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| cfg.discover.timeout());
    let search_target = args.search_target.unwrap_or(cfg.discover.search_target.clone());
    info!("Discovering devices for {:?} (ST={})", timeout, search_target);

    let client = DescriptionClient::new(&cfg.http)?;
    let devices = ssdp::discover_devices(&client, timeout, &search_target)
        .await
        .context("Failed to discover devices")?;

    let mut out = ui::table_writer(std::io::stdout());
    for device in &devices {
        write_summary(&mut out, device).context("Failed to write device summary")?;
    }
    out.flush().context("Failed to flush output")?;

    Ok(())
}

fn write_summary<W: Write>(w: &mut W, device: &ssdp::DeviceSummary) -> io::Result<()> {
    writeln!(w, "FriendlyName\t{}", device.friendly_name)?;
    writeln!(w, "Manufacturer\t{}", device.manufacturer)?;
    writeln!(w, "ModelName\t{}", device.model_name)?;
    writeln!(w, "ModelDescription\t{}", device.model_description)?;
    writeln!(w, "SerialNumber\t{}", device.serial_number)?;
    writeln!(w, "UDN\t{}", device.udn)?;
    writeln!(w, "Location\t{}", device.location)?;
    writeln!(w)
}
