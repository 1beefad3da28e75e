use thiserror::Error;

/// Errors raised while talking to the file server.
///
/// The UI collapses every variant into one generic failure notification;
/// the distinction only matters for logging.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (offline, CORS, aborted).
    #[error("Netzwerkfehler: {0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, usually `{"error": "..."}`.
        body: String,
    },
    /// The response body could not be decoded.
    #[error("Ungültige Antwort: {0}")]
    Decode(String),
}

impl ApiError {
    /// Builds a status error, pulling the `error` field out of a JSON body when present.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());
        ApiError::Status { status, body: detail }
    }

    /// Maps a finished request's status to a result. Any 2xx is success;
    /// status 0 means the browser never got a response.
    ///
    /// `body` is only read for error statuses.
    pub fn check_status(status: u16, body: impl FnOnce() -> String) -> ApiResult<()> {
        match status {
            200..=299 => Ok(()),
            0 => Err(ApiError::Network("keine Antwort vom Server".into())),
            _ => Err(ApiError::from_status(status, &body())),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised while loading or validating the UI configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config source error: {0}")]
    Source(#[from] ::config::ConfigError),
    #[error("invalid {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ConfigError::Invalid { field, message: message.into() }
    }
}

/// Errors raised while rendering a QR code.
#[derive(Debug, Error)]
pub enum QrError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("unsupported error correction level: {0}")]
    EcLevel(String),
}
