//! Unit and scenario tests for the QRShare UI core.
//!
//! Everything here runs natively; the browser bindings are not involved.
//!
//! ## Test Modules
//!
//! - **support**: In-memory API, surface, confirmation and runtime fakes
//! - **config_tests**: Embedded defaults, overrides and validation
//! - **endpoints_tests**: URL construction and filename encoding
//! - **types_tests**: Decoding of `/files` responses and error bodies
//! - **transfer_tests**: Progress computation and per-transfer state
//! - **notify_tests**: Notification store
//! - **qr_tests**: SVG rendering of the page URL
//! - **logging_tests**: Filter directive parsing
//! - **manager_tests**: Upload, list, download, delete and notification flows
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test
//! cargo test manager_tests
//! ```

pub mod support;

pub mod config_tests;
