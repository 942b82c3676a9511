// ── Runtime settings ──
//
// These types describe *what* a workflow should do and *how* to reach the
// management server. They never touch disk: `cstemplate-config` builds them
// from the INI file and CLI overrides and hands them in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::columns::ColumnSelection;

/// How to authenticate with the management server.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// Signed requests with an API key pair (preferred).
    ApiKey {
        api_key: String,
        secret_key: SecretString,
    },
    /// Username/password session login.
    Credentials {
        username: String,
        password: SecretString,
        domain: String,
    },
}

/// Connection parameters for a single invocation.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub endpoint: Url,
    pub auth: AuthCredentials,
    pub timeout: Duration,
    /// Accept invalid TLS certificates.
    pub insecure: bool,
}

/// A template to register: display name and source image location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    pub name: String,
    pub url: String,
}

impl TemplateSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Fully resolved input for the register workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterSettings {
    /// OS type search term, unescaped.
    pub ostype: String,
    /// Zone search term, unescaped.
    pub zonename: String,
    pub format: String,
    pub hypervisor: String,
    pub password_enabled: bool,
    pub templates: Vec<TemplateSource>,
}

/// Fully resolved input for the list workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSettings {
    /// Search term, or `all` for an unfiltered listing.
    pub keyword: String,
    pub columns: ColumnSelection,
}

impl ListSettings {
    /// Keyword value that disables server-side filtering.
    pub const ALL: &'static str = "all";

    /// The escaped keyword to send, or `None` for an unfiltered listing.
    pub fn filter(&self) -> Option<String> {
        if self.keyword == Self::ALL {
            None
        } else {
            Some(crate::escape::escape_keyword(&self.keyword))
        }
    }
}
