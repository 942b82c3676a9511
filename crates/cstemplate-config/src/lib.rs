//! INI configuration for cstemplate.
//!
//! Loads `/etc/cstemplate.ini` (or `--ini`), exposes each section as an
//! ordered key/value map, and merges sections with CLI overrides into the
//! typed settings `cstemplate_core` workflows consume.
//!
//! ```ini
//! [main]
//! endpoint = http://cloud.example:8080/client/api
//! apikey = ...
//! secretkey = ...
//! zonename = zone1
//! format = QCOW2
//! hypervisor = KVM
//! ostype = CentOS 6.5%64
//! passwordenabled = true
//!
//! [register]
//! centos65 = http://mirror.example/centos65.qcow2
//!
//! [delete]
//! id1 = 5c8e...
//!
//! [list]
//! keyword = all
//! id = true
//! name = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use indexmap::IndexMap;
use ini::Ini;
use secrecy::SecretString;
use thiserror::Error;

use cstemplate_core::{
    AuthCredentials, ColumnSelection, ConnectionConfig, ListSettings, RegisterSettings,
    TemplateSource,
};

pub const MAIN_SECTION: &str = "main";
pub const REGISTER_SECTION: &str = "register";
pub const DELETE_SECTION: &str = "delete";
pub const LIST_SECTION: &str = "list";

const KEYWORD_KEY: &str = "keyword";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] ini::ParseError),

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured: set apikey/secretkey or username/password in [main]")]
    NoCredentials,
}

// ── INI wrapper ─────────────────────────────────────────────────────

/// Parsed configuration file. Read-only for the rest of the run.
#[derive(Debug, Clone)]
pub struct IniConfig {
    ini: Ini,
}

impl IniConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { ini })
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            ini: Ini::load_from_str(text)?,
        })
    }

    /// A single value; empty values count as absent.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.ini
            .get_from(Some(section), key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// All entries of a section in file order. A missing section is empty.
    pub fn section(&self, name: &str) -> IndexMap<String, String> {
        self.ini
            .section(Some(name))
            .map(|props| {
                props
                    .iter()
                    .map(|(k, v)| (k.trim().to_owned(), v.trim().to_owned()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Section entries with explicitly-set CLI overrides applied on top.
    pub fn resolve(
        &self,
        section: &str,
        overrides: &[(&str, Option<&str>)],
    ) -> IndexMap<String, String> {
        let mut values = self.section(section);
        for (key, value) in overrides {
            if let Some(value) = value {
                values.insert((*key).to_owned(), (*value).to_owned());
            }
        }
        values
    }

    fn flag(&self, section: &str, key: &str) -> bool {
        self.get(section, key).is_some_and(parse_bool)
    }
}

/// Best-effort boolean parsing; anything unrecognised is `false`.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "on" | "1"
    )
}

// ── Connection ──────────────────────────────────────────────────────

/// Build connection settings from `[main]`.
///
/// An API key pair wins over username/password when both are present.
pub fn connection_config(config: &IniConfig) -> Result<ConnectionConfig, ConfigError> {
    let endpoint_str = config
        .get(MAIN_SECTION, "endpoint")
        .ok_or_else(|| ConfigError::Validation {
            field: "endpoint".into(),
            reason: "missing from [main]".into(),
        })?;
    let endpoint: url::Url = endpoint_str.parse().map_err(|e| ConfigError::Validation {
        field: "endpoint".into(),
        reason: format!("invalid URL {endpoint_str}: {e}"),
    })?;

    let auth = match (
        config.get(MAIN_SECTION, "apikey"),
        config.get(MAIN_SECTION, "secretkey"),
        config.get(MAIN_SECTION, "username"),
    ) {
        (Some(api_key), Some(secret_key), _) => AuthCredentials::ApiKey {
            api_key: api_key.to_owned(),
            secret_key: SecretString::from(secret_key.to_owned()),
        },
        (_, _, Some(username)) => AuthCredentials::Credentials {
            username: username.to_owned(),
            password: SecretString::from(
                config.get(MAIN_SECTION, "password").unwrap_or_default().to_owned(),
            ),
            domain: config.get(MAIN_SECTION, "domain").unwrap_or("/").to_owned(),
        },
        _ => return Err(ConfigError::NoCredentials),
    };

    let timeout = match config.get(MAIN_SECTION, "timeout") {
        Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::Validation {
            field: "timeout".into(),
            reason: format!("expected seconds, got '{raw}'"),
        })?,
        None => DEFAULT_TIMEOUT_SECS,
    };

    Ok(ConnectionConfig {
        endpoint,
        auth,
        timeout: Duration::from_secs(timeout),
        insecure: config.flag(MAIN_SECTION, "insecure"),
    })
}

// ── Register ────────────────────────────────────────────────────────

/// CLI values that take precedence over `[main]` / `[register]`.
#[derive(Debug, Clone, Default)]
pub struct RegisterOverrides {
    /// A single template from positional arguments; replaces `[register]`.
    pub template: Option<TemplateSource>,
    pub ostype: Option<String>,
    /// Only an explicit `false` overrides the configured value.
    pub password_enabled: Option<bool>,
}

pub fn register_settings(config: &IniConfig, overrides: RegisterOverrides) -> RegisterSettings {
    let main = config.resolve(MAIN_SECTION, &[("ostype", overrides.ostype.as_deref())]);
    let text = |key: &str| main.get(key).cloned().unwrap_or_default();

    let password_enabled = match overrides.password_enabled {
        Some(false) => false,
        _ => main.get("passwordenabled").is_some_and(|v| parse_bool(v)),
    };

    let templates = match overrides.template {
        Some(source) => vec![source],
        None => config
            .section(REGISTER_SECTION)
            .into_iter()
            .map(|(name, url)| TemplateSource::new(name, url))
            .collect(),
    };

    RegisterSettings {
        ostype: text("ostype"),
        zonename: text("zonename"),
        format: text("format"),
        hypervisor: text("hypervisor"),
        password_enabled,
        templates,
    }
}

// ── Delete ──────────────────────────────────────────────────────────

/// Positional ids if any were given, else every value in `[delete]`.
pub fn delete_ids(config: &IniConfig, ids: Vec<String>) -> Vec<String> {
    if ids.is_empty() {
        config.section(DELETE_SECTION).into_values().collect()
    } else {
        ids
    }
}

// ── List ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ListOverrides {
    pub keyword: Option<String>,
    /// Comma-separated columns; replaces the configured visibility.
    pub columns: Option<String>,
}

pub fn list_settings(config: &IniConfig, overrides: ListOverrides) -> ListSettings {
    let section = config.section(LIST_SECTION);

    let mut columns = ColumnSelection::from_toggles(
        section
            .iter()
            .filter(|(key, _)| !key.eq_ignore_ascii_case(KEYWORD_KEY))
            .map(|(key, value)| (key.as_str(), parse_bool(value))),
    );
    if let Some(ref list) = overrides.columns {
        columns.replace_with(list);
    }

    let keyword = overrides
        .keyword
        .or_else(|| {
            section
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(KEYWORD_KEY))
                .map(|(_, value)| value.clone())
                .filter(|value| !value.is_empty())
        })
        .unwrap_or_else(|| ListSettings::ALL.to_owned());

    ListSettings { keyword, columns }
}
