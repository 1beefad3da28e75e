//! Browser bindings: HTTP transport, DOM wiring and the Dioxus components.
//!
//! Compiled only for `wasm32`.

pub mod api;
pub mod dom;
pub mod surface;
mod ui;

pub use ui::launch;
