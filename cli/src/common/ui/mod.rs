//! # upnpdig UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Reports are produced as tab-delimited labeled lines (`Label\tvalue`). This module
//! provides the writer that turns those tabs into aligned columns on the terminal,
//! using elastic tab stops: consecutive lines sharing a column are padded to the
//! widest cell in that block.
//!
//! Cells have no minimum width and are separated by a single space.
//!
//! ## Usage
//!
//! ```rust
//! let mut out = ui::table_writer(std::io::stdout());
//! render::render_device(&mut out, &description.device, "")?;
//! out.flush()?;
//! ```
//!
use std::io::Write;
use tabwriter::TabWriter;

/// Wraps `inner` in a column-aligning writer. Output is buffered until `flush`.
pub fn table_writer<W: Write>(inner: W) -> TabWriter<W> {
    TabWriter::new(inner).minwidth(0).padding(1)
}
