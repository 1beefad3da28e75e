//! # QRShare Web UI Library
//!
//! Browser-side file manager for sharing files on the local network. The page
//! shows a QR code linking to itself, accepts files via drag-and-drop or a file
//! picker, uploads them with per-transfer progress, and lists, downloads and
//! deletes the files held by the server.
//!
//! ## Architecture
//!
//! The application is built using:
//! - **Dioxus**: component rendering in the browser (WebAssembly only)
//! - **reqwasm / XMLHttpRequest**: HTTP calls against the file server
//! - **Serde**: JSON decoding of the file list
//! - **tracing**: structured logging, forwarded to the browser console
//!
//! ## Core Components
//!
//! - [`config`]: Embedded defaults plus optional TOML overrides
//! - [`endpoints`]: URL construction for the server routes
//! - [`error`]: Error types for HTTP, configuration and QR rendering
//! - [`manager`]: The file manager controller (upload, list, download, delete, notify)
//! - [`notify`]: Transient notification store
//! - [`qr`]: QR code rendering to SVG
//! - [`transfer`]: Per-upload progress tracking
//! - [`types`]: Data transfer objects shared with the server
//!
//! The controller talks to the outside world only through the traits in
//! [`manager`], so everything except the `web` module runs natively in tests.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod logging;
pub mod manager;
pub mod notify;
pub mod qr;
pub mod transfer;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
mod tests;
