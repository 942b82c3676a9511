// ── Core error types ──
//
// User-facing errors from cstemplate-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<cstemplate_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to management server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Lookup errors ────────────────────────────────────────────────
    #[error("OS type not found: {name}")]
    OsTypeNotFound { name: String },

    #[error("Zone not found: {name}")]
    ZoneNotFound { name: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// CloudStack error code (e.g. 431 for parameter errors).
        code: Option<u16>,
    },

    // ── Output ───────────────────────────────────────────────────────
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<cstemplate_api::Error> for CoreError {
    fn from(err: cstemplate_api::Error) -> Self {
        match err {
            cstemplate_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            cstemplate_api::Error::Transport(ref e) => {
                if e.is_connect() || e.is_timeout() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| format!("{}{}", u.origin().ascii_serialization(), u.path()))
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            cstemplate_api::Error::InvalidUrl(e) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("Invalid URL: {e}"),
            },
            cstemplate_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            cstemplate_api::Error::Api { code, message } => CoreError::Api {
                message,
                code: Some(code),
            },
            cstemplate_api::Error::EmptyResponse { command } => CoreError::Api {
                message: format!("{command} returned no result"),
                code: None,
            },
            cstemplate_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
