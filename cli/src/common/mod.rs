//! # upnpdig Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared utilities used by the command handlers, kept apart from the pure core
//! (`core::`) and the command wiring (`commands::`):
//!
//! - **`network`**: HTTP retrieval of description documents and SSDP discovery.
//! - **`ui`**: Column alignment for the tab-delimited reports.
//!

/// Description fetching (HTTP) and device discovery (SSDP).
pub mod network;
/// Terminal output helpers (tab-stop column alignment).
pub mod ui;
