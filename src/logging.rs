//! Logging setup.
//!
//! In the browser there is neither stdout nor an environment, so the fmt layer
//! writes through [`ConsoleMakeWriter`], which hands every formatted line to
//! the matching `console.*` method. Filter directives come from `[log] filter`.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

pub const FALLBACK_FILTER: &str = "info";

pub fn parse_filter(directives: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(directives)
}

/// Parses the configured directives, falling back to `info` when they are invalid.
pub fn env_filter(directives: &str) -> EnvFilter {
    parse_filter(directives).unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}

#[cfg(target_arch = "wasm32")]
pub use console::{init, ConsoleMakeWriter};

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    use web_sys::console;

    use crate::config::LogConfig;

    pub struct ConsoleMakeWriter;

    pub struct ConsoleWriter {
        level: Level,
        buf: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let line = String::from_utf8_lossy(&self.buf);
            let msg = wasm_bindgen::JsValue::from_str(line.trim_end());
            match self.level {
                Level::ERROR => console::error_1(&msg),
                Level::WARN => console::warn_1(&msg),
                Level::INFO => console::info_1(&msg),
                _ => console::debug_1(&msg),
            }
        }
    }

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter { level: Level::INFO, buf: Vec::new() }
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter { level: *meta.level(), buf: Vec::new() }
        }
    }

    /// Installs the global subscriber. Later calls are ignored.
    pub fn init(cfg: &LogConfig) {
        let filter = super::env_filter(&cfg.filter);
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .without_time()
                    .with_writer(ConsoleMakeWriter),
            )
            .try_init();
    }
}
