//! # upnpdig CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`describe.rs`, `discover.rs`, ...).
//! Each `.rs` file in `cli/tests/` is compiled as a separate test crate that runs the
//! compiled `upnpdig` binary.
//!
//! Besides building the command, this module can start a throw-away HTTP server on
//! `127.0.0.1:0` that serves fixture description documents, so `describe` can be
//! exercised end to end without a real UPnP device.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use axum::{http::header, routing::get, Router};
use std::path::Path;

pub const DEVICE_DESCRIPTION: &str = include_str!("fixtures/device_description.xml");
pub const RENDERING_CONTROL_SCPD: &str = include_str!("fixtures/rendering_control.xml");
pub const BROKEN_SIBLING_DEVICE: &str = include_str!("fixtures/broken_sibling_device.xml");

/// # Get upnpdig Command (`upnpdig_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `upnpdig` binary, isolated from
/// the developer's own configuration: `UPNPDIG_CONFIG` points at `config_file` (which
/// may not exist) and the working directory is `workdir`, so no project file is found.
///
/// ## Panics
/// Panics if the `upnpdig` binary cannot be found via `Command::cargo_bin`.
pub fn upnpdig_cmd(workdir: &Path, config_file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("upnpdig").expect("Failed to find upnpdig binary for testing");
    cmd.current_dir(workdir)
        .env("UPNPDIG_CONFIG", config_file)
        .env_remove("RUST_LOG");
    cmd
}

/// Adds a GET route answering `body` as XML.
pub fn xml_route(router: Router, path: &str, body: &'static str) -> Router {
    router.route(
        path,
        get(move || async move { ([(header::CONTENT_TYPE, "text/xml; charset=\"utf-8\"")], body) }),
    )
}

/// # Serve Fixtures (`serve`)
///
/// Starts `router` on an ephemeral localhost port in a background thread with its
/// own Tokio runtime, and returns the server's base URL (`http://127.0.0.1:<port>`).
/// The server lives until the test process exits.
pub fn serve(router: Router) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind fixture server");
    listener
        .set_nonblocking(true)
        .expect("Failed to make fixture listener non-blocking");
    let addr = listener.local_addr().expect("Fixture server has no local address");

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to build fixture runtime");
        runtime.block_on(async move {
            let listener =
                tokio::net::TcpListener::from_std(listener).expect("Failed to adopt fixture listener");
            axum::serve(listener, router).await.expect("Fixture server failed");
        });
    });

    format!("http://{}", addr)
}
