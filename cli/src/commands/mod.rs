//! # upnpdig Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the upnpdig CLI and makes them
//! accessible to the main entry point (`main.rs`).
//!
//! ## Commands
//!
//! - `describe`: Describe a device tree, or one service of it, from a description URL
//! - `discover`: Find UPnP devices on the local network via SSDP
//!
//! Each command defines its own arguments structure and an async handler function.
//!

/// `upnpdig describe`: device tree or service description report.
pub mod describe;
/// `upnpdig discover`: SSDP search and device summaries.
pub mod discover;
