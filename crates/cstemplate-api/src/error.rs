use thiserror::Error;

/// Top-level error type for the `cstemplate-api` crate.
///
/// Covers every failure mode of the CloudStack boundary: authentication,
/// transport, API error envelopes, and response decoding.
/// `cstemplate-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed or the request signature / session was rejected.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Error reported by the management server in its response envelope.
    #[error("API error {code}: {message}")]
    Api { code: u16, message: String },

    /// The server answered successfully but returned no entity where one
    /// was required.
    #[error("Empty response from {command}")]
    EmptyResponse { command: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
