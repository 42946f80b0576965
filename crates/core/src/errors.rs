use thiserror::Error;

/// Unified error type for the entire market-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Conditions the dashboard treats as normal outcomes (a skipped DCA range,
/// a ticker with no data in range, a missing report) are result variants,
/// not errors.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Documents ───────────────────────────────────────────────────
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Network ─────────────────────────────────────────────────────
    #[error("Source error ({source_name}): {message}")]
    Api {
        source_name: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Dashboard state ─────────────────────────────────────────────
    #[error("Unknown ticker: {0}")]
    UnknownTicker(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Strip query parameters: signed URLs for hosted snapshots carry tokens.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
