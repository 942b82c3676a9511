//! Column registry and selection for template listings.
//!
//! Every known template attribute has a named extractor. The list workflow
//! picks columns by (case-insensitive) name at render time instead of
//! enumerating fields at runtime.

use cstemplate_api::Template;
use indexmap::IndexMap;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

// ── Registry ─────────────────────────────────────────────────────────

/// How a column turns a template into a cell.
#[derive(Clone, Copy)]
pub enum Cell {
    /// Opaque identifier, rendered in its string form.
    Identifier(fn(&Template) -> &str),
    /// Ordinary attribute.
    Value(fn(&Template) -> String),
    /// Nested collection; the cell shows its type name as a placeholder.
    Group(&'static str),
}

/// A named template attribute that can be shown in a listing.
#[derive(Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub cell: Cell,
}

impl Column {
    pub fn render(&self, template: &Template) -> String {
        match self.cell {
            Cell::Identifier(extract) => extract(template).to_owned(),
            Cell::Value(extract) => extract(template),
            Cell::Group(label) => label.to_owned(),
        }
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column").field("name", &self.name).finish()
    }
}

fn text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

fn flag(value: Option<bool>) -> String {
    value.map(|b| b.to_string()).unwrap_or_default()
}

fn opt_id(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}

/// Known template columns, in display order.
pub const TEMPLATE_COLUMNS: &[Column] = &[
    Column { name: "id", cell: Cell::Identifier(|t| t.id.as_str()) },
    Column { name: "name", cell: Cell::Value(|t| t.name.clone()) },
    Column { name: "displaytext", cell: Cell::Value(|t| text(t.displaytext.as_ref())) },
    Column { name: "ispublic", cell: Cell::Value(|t| flag(t.ispublic)) },
    Column { name: "created", cell: Cell::Value(|t| text(t.created.as_ref())) },
    Column { name: "isready", cell: Cell::Value(|t| t.isready.to_string()) },
    Column { name: "passwordenabled", cell: Cell::Value(|t| flag(t.passwordenabled)) },
    Column { name: "format", cell: Cell::Value(|t| text(t.format.as_ref())) },
    Column { name: "isfeatured", cell: Cell::Value(|t| flag(t.isfeatured)) },
    Column { name: "crosszones", cell: Cell::Value(|t| flag(t.cross_zones)) },
    Column { name: "ostypeid", cell: Cell::Identifier(|t| opt_id(t.ostypeid.as_ref())) },
    Column { name: "ostypename", cell: Cell::Value(|t| text(t.ostypename.as_ref())) },
    Column { name: "account", cell: Cell::Value(|t| text(t.account.as_ref())) },
    Column { name: "zoneid", cell: Cell::Identifier(|t| opt_id(t.zoneid.as_ref())) },
    Column { name: "zonename", cell: Cell::Value(|t| text(t.zonename.as_ref())) },
    Column { name: "status", cell: Cell::Value(|t| text(t.status.as_ref())) },
    Column {
        name: "size",
        cell: Cell::Value(|t| t.size.map(|s| s.to_string()).unwrap_or_default()),
    },
    Column { name: "templatetype", cell: Cell::Value(|t| text(t.templatetype.as_ref())) },
    Column { name: "hypervisor", cell: Cell::Value(|t| text(t.hypervisor.as_ref())) },
    Column { name: "domain", cell: Cell::Value(|t| text(t.domain.as_ref())) },
    Column { name: "domainid", cell: Cell::Identifier(|t| opt_id(t.domainid.as_ref())) },
    Column { name: "isextractable", cell: Cell::Value(|t| flag(t.isextractable)) },
    Column { name: "checksum", cell: Cell::Value(|t| text(t.checksum.as_ref())) },
    Column { name: "sshkeyenabled", cell: Cell::Value(|t| flag(t.sshkeyenabled)) },
    Column {
        name: "isdynamicallyscalable",
        cell: Cell::Value(|t| flag(t.isdynamicallyscalable)),
    },
    Column { name: "tags", cell: Cell::Group("Tags") },
];

/// Look up a known column by name, ignoring case.
pub fn find_column(name: &str) -> Option<&'static Column> {
    TEMPLATE_COLUMNS
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}

// ── Selection ────────────────────────────────────────────────────────

/// Which columns a listing should show, keyed by lowercase name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSelection {
    toggles: IndexMap<String, bool>,
}

impl ColumnSelection {
    /// Build from `(name, visible)` pairs, e.g. the `[list]` config section.
    pub fn from_toggles<I, S>(toggles: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        Self {
            toggles: toggles
                .into_iter()
                .map(|(name, visible)| (name.as_ref().trim().to_lowercase(), visible))
                .collect(),
        }
    }

    /// Replace the visible set with a comma-separated list.
    ///
    /// Every existing toggle is hidden first, so the list fully overrides
    /// whatever the config enabled.
    pub fn replace_with(&mut self, columns: &str) {
        for visible in self.toggles.values_mut() {
            *visible = false;
        }
        for name in columns.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            self.toggles.insert(name.to_lowercase(), true);
        }
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.toggles
            .get(&name.to_lowercase())
            .copied()
            .unwrap_or(false)
    }

    /// Names currently marked visible, in insertion order.
    pub fn visible(&self) -> impl Iterator<Item = &str> {
        self.toggles
            .iter()
            .filter(|(_, visible)| **visible)
            .map(|(name, _)| name.as_str())
    }
}

// ── Rendering ────────────────────────────────────────────────────────

/// A column chosen for display: a registry entry or an extra attribute
/// carried by the server's response.
#[derive(Debug, Clone)]
pub enum DisplayColumn {
    Known(&'static Column),
    Extra(String),
}

impl DisplayColumn {
    pub fn name(&self) -> &str {
        match self {
            Self::Known(column) => column.name,
            Self::Extra(name) => name,
        }
    }

    pub fn render(&self, template: &Template) -> String {
        match self {
            Self::Known(column) => column.render(template),
            Self::Extra(name) => template.extra.get(name).map(render_extra).unwrap_or_default(),
        }
    }
}

fn render_extra(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(_) => "List".into(),
        Value::Object(_) => "Object".into(),
        other => other.to_string(),
    }
}

/// Pick the display columns from the first record's attributes.
///
/// Known columns come first in registry order, followed by any visible
/// extra attributes of `first`. The result is used for every row.
pub fn select_columns(first: &Template, selection: &ColumnSelection) -> Vec<DisplayColumn> {
    let known = TEMPLATE_COLUMNS
        .iter()
        .filter(|c| selection.is_visible(c.name))
        .map(DisplayColumn::Known);

    let extra = first
        .extra
        .keys()
        .filter(|key| find_column(key).is_none() && selection.is_visible(key))
        .map(|key| DisplayColumn::Extra(key.clone()));

    known.chain(extra).collect()
}

/// Render templates as a markdown-style table: header, separator, rows.
pub fn render_table(templates: &[Template], columns: &[DisplayColumn]) -> String {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(DisplayColumn::name));
    for template in templates {
        builder.push_record(columns.iter().map(|c| c.render(template)));
    }
    builder.build().with(Style::markdown()).to_string()
}
