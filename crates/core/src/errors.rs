use thiserror::Error;

/// Unified error type for the finance-analytics-core library.
///
/// The analytics themselves never fail: degenerate input produces a neutral
/// result and out-of-range numbers are clamped. Errors only come from the
/// edges: configuration, JSON (de)serialization and OS entropy.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Randomness ──────────────────────────────────────────────────
    #[error("Entropy unavailable: {0}")]
    Entropy(String),

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<getrandom::Error> for CoreError {
    fn from(e: getrandom::Error) -> Self {
        CoreError::Entropy(e.to_string())
    }
}
