// CloudStack response and request types
//
// Entities returned by listOsTypes, listZones, listTemplates, registerTemplate
// and deleteTemplate. Fields use `#[serde(default)]` liberally because the
// management server omits attributes that have no value (e.g. `size` before
// a template finishes downloading).

use serde::{Deserialize, Serialize};

// ── Catalog ──────────────────────────────────────────────────────────

/// Guest OS catalog entry from `listOsTypes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsType {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub oscategoryid: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Zone from `listZones`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub allocationstate: Option<String>,
    #[serde(default)]
    pub networktype: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Template ─────────────────────────────────────────────────────────

/// Template object from `listTemplates` / `registerTemplate`.
///
/// The commonly displayed attributes are modelled explicitly; everything
/// else the server sends lands in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub displaytext: Option<String>,
    #[serde(default)]
    pub ispublic: Option<bool>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub isready: bool,
    #[serde(default)]
    pub passwordenabled: Option<bool>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub isfeatured: Option<bool>,
    #[serde(default, rename = "crossZones")]
    pub cross_zones: Option<bool>,
    #[serde(default)]
    pub ostypeid: Option<String>,
    #[serde(default)]
    pub ostypename: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub zoneid: Option<String>,
    #[serde(default)]
    pub zonename: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Virtual size in bytes, absent until the image has been processed.
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub templatetype: Option<String>,
    #[serde(default)]
    pub hypervisor: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub domainid: Option<String>,
    #[serde(default)]
    pub isextractable: Option<bool>,
    #[serde(default)]
    pub checksum: Option<String>,
    #[serde(default)]
    pub sshkeyenabled: Option<bool>,
    #[serde(default)]
    pub isdynamicallyscalable: Option<bool>,
    #[serde(default)]
    pub tags: Vec<ResourceTag>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Key/value tag attached to a resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceTag {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// Async job handle returned by mutating commands such as `deleteTemplate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsyncJob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displaytext: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Payload of `loginresponse`.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub sessionkey: String,
}

// ── Requests ─────────────────────────────────────────────────────────

/// Parameters for `registerTemplate`.
///
/// `url` is sent as-is; callers escape it beforehand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterTemplate {
    pub name: String,
    pub display_text: String,
    pub format: String,
    pub hypervisor: String,
    pub os_type_id: String,
    pub url: String,
    pub zone_id: String,
    pub is_public: bool,
    pub password_enabled: bool,
}

impl RegisterTemplate {
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("displaytext", self.display_text.clone()),
            ("format", self.format.clone()),
            ("hypervisor", self.hypervisor.clone()),
            ("ostypeid", self.os_type_id.clone()),
            ("url", self.url.clone()),
            ("zoneid", self.zone_id.clone()),
            ("ispublic", self.is_public.to_string()),
            ("passwordenabled", self.password_enabled.to_string()),
        ]
    }
}

/// Parameters for `listTemplates`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTemplates {
    /// `templatefilter`: `all`, `featured`, `self`, `community`, ...
    pub filter: String,
    pub keyword: Option<String>,
    pub id: Option<String>,
}

impl ListTemplates {
    /// Every template visible to the caller.
    pub fn all() -> Self {
        Self {
            filter: "all".into(),
            keyword: None,
            id: None,
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("templatefilter", self.filter.clone())];
        if let Some(ref keyword) = self.keyword {
            params.push(("keyword", keyword.clone()));
        }
        if let Some(ref id) = self.id {
            params.push(("id", id.clone()));
        }
        params
    }
}
