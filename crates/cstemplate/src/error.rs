//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use cstemplate_config::ConfigError;
use cstemplate_core::CoreError;

/// Exit codes. Usage errors exit with 2 from clap itself.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const CONFIG: i32 = 3;
    pub const INTERRUPTED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("Could not read configuration file {path}")]
    #[diagnostic(
        code(cstemplate::config_load),
        help("Create the file or point --ini (CSTEMPLATE_INI) at another one.")
    )]
    ConfigLoad {
        path: String,
        #[source]
        source: ConfigError,
    },

    #[error("No credentials configured in [main]")]
    #[diagnostic(
        code(cstemplate::no_credentials),
        help("Set apikey and secretkey, or username and password, in the [main] section.")
    )]
    NoCredentials,

    #[error(transparent)]
    #[diagnostic(code(cstemplate::config))]
    Config(ConfigError),

    // ── Lookups ──────────────────────────────────────────────────────
    #[error("OS type '{name}' not found")]
    #[diagnostic(
        code(cstemplate::ostype_not_found),
        help("Check `ostype` in [main] or pass --ostype. `%` matches any text.")
    )]
    OsTypeNotFound { name: String },

    #[error("Zone '{name}' not found")]
    #[diagnostic(
        code(cstemplate::zone_not_found),
        help("Check `zonename` in [main].")
    )]
    ZoneNotFound { name: String },

    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to management server at {url}")]
    #[diagnostic(
        code(cstemplate::connection_failed),
        help("Check `endpoint` in [main] and that the server is reachable.\nCause: {reason}")
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(cstemplate::auth_failed),
        help("Verify the API key pair or username/password in [main].")
    )]
    AuthFailed { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(cstemplate::api_error))]
    ApiError { message: String },

    // ── Process ──────────────────────────────────────────────────────
    #[error("Interrupted")]
    #[diagnostic(code(cstemplate::interrupted))]
    Interrupted,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigLoad { .. } | Self::NoCredentials | Self::Config(_) => exit_code::CONFIG,
            Self::Interrupted => exit_code::INTERRUPTED,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Load { ref path, .. } => CliError::ConfigLoad {
                path: path.display().to_string(),
                source: err,
            },
            ConfigError::NoCredentials => CliError::NoCredentials,
            other => CliError::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::OsTypeNotFound { name } => CliError::OsTypeNotFound { name },
            CoreError::ZoneNotFound { name } => CliError::ZoneNotFound { name },
            CoreError::Api { message, .. } | CoreError::Internal(message) => {
                CliError::ApiError { message }
            }
            CoreError::Output(e) => CliError::Io(e),
        }
    }
}
