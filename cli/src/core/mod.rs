//! # upnpdig Core
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The core of upnpdig: the description document model, the service location
//! resolver and the report renderer, plus the infrastructure every command uses
//! (configuration and error types).
//!
//! ## Architecture
//!
//! - `description`: Parsed device and service description documents (pure data)
//! - `resolver`: Depth-first lookup of a service and resolution of its SCPD URL
//! - `render`: Tab-delimited, indentation-scoped text reports
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the `Result` alias
//!
//! `description`, `resolver` and `render` perform no I/O of their own beyond writing
//! to the sink they are handed. Fetching and discovery live in `common::network`.
//!
pub mod config;
pub mod description;
pub mod error;
pub mod render;
pub mod resolver;
