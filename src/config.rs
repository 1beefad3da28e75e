use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULTS: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EndpointsConfig {
    /// Prefix for every route, empty for same-origin relative URLs.
    pub base: String,
    pub upload: String,
    pub files: String,
    pub download: String,
    pub delete: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TimingConfig {
    /// Delay between an upload settling and its progress row disappearing.
    pub progress_settle_ms: u64,
    /// Lifetime of a notification banner.
    pub notice_ttl_ms: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QrConfig {
    pub size: u32,
    pub dark: String,
    pub light: String,
    pub ec_level: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MessagesConfig {
    pub upload_ok: String,
    pub upload_failed: String,
    pub delete_ok: String,
    pub delete_failed: String,
    pub confirm_delete: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LogConfig {
    pub filter: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UiConfig {
    pub endpoints: EndpointsConfig,
    pub timing: TimingConfig,
    pub qr: QrConfig,
    pub messages: MessagesConfig,
    pub log: LogConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        // Fallback: parse the embedded default TOML
        match load(None) {
            Ok(cfg) => cfg,
            Err(e) => panic!("Failed to parse embedded default config: {}", e),
        }
    }
}

/// Loads the configuration: embedded defaults, then the optional override document.
///
/// The override is a TOML string and may set any subset of keys.
pub fn load(overrides: Option<&str>) -> Result<UiConfig, ConfigError> {
    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml));
    if let Some(text) = overrides.filter(|t| !t.trim().is_empty()) {
        builder = builder.add_source(::config::File::from_str(text, ::config::FileFormat::Toml));
    }
    let cfg: UiConfig = builder.build()?.try_deserialize()?;
    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &UiConfig) -> Result<(), ConfigError> {
    let ep = &cfg.endpoints;
    for (field, path) in [
        ("endpoints.upload", &ep.upload),
        ("endpoints.files", &ep.files),
        ("endpoints.download", &ep.download),
        ("endpoints.delete", &ep.delete),
    ] {
        if !path.starts_with('/') {
            return Err(ConfigError::invalid(field, format!("must start with '/': {:?}", path)));
        }
    }
    if ep.base.ends_with('/') {
        return Err(ConfigError::invalid("endpoints.base", "must not end with '/'"));
    }

    if cfg.timing.progress_settle_ms == 0 {
        return Err(ConfigError::invalid("timing.progress_settle_ms", "must be > 0"));
    }
    if cfg.timing.notice_ttl_ms == 0 {
        return Err(ConfigError::invalid("timing.notice_ttl_ms", "must be > 0"));
    }

    // 21 = Kantenlänge der kleinsten QR-Version
    if !(21..=4096).contains(&cfg.qr.size) {
        return Err(ConfigError::invalid("qr.size", format!("must be in 21..=4096, got {}", cfg.qr.size)));
    }
    if cfg.qr.dark.trim().is_empty() || cfg.qr.light.trim().is_empty() {
        return Err(ConfigError::invalid("qr.dark/qr.light", "colors must not be empty"));
    }
    if crate::qr::parse_ec_level(&cfg.qr.ec_level).is_err() {
        return Err(ConfigError::invalid("qr.ec_level", format!("expected L, M, Q or H, got {:?}", cfg.qr.ec_level)));
    }

    let m = &cfg.messages;
    for (field, text) in [
        ("messages.upload_ok", &m.upload_ok),
        ("messages.upload_failed", &m.upload_failed),
        ("messages.delete_ok", &m.delete_ok),
        ("messages.delete_failed", &m.delete_failed),
        ("messages.confirm_delete", &m.confirm_delete),
    ] {
        if text.trim().is_empty() {
            return Err(ConfigError::invalid(field, "must not be empty"));
        }
    }

    Ok(())
}
