//! # upnpdig Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Everything that touches the network lives here, outside the core:
//!
//! - **`http`**: Fetches device and service description documents and parses them
//!   into the `core::description` model.
//! - **`ssdp`**: Discovers devices with an SSDP `M-SEARCH` and summarizes them.
//!
//! Command handlers call these before handing already-parsed documents to the
//! resolver and renderer, which never perform I/O themselves.
//!
pub mod http;
pub mod ssdp;
