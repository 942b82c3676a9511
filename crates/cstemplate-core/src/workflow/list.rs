//! Template listing with selectable columns.

use std::io::Write;

use cstemplate_api::ListTemplates;
use tracing::{debug, warn};

use crate::columns::{render_table, select_columns};
use crate::config::ListSettings;
use crate::error::CoreError;
use crate::service::TemplateService;

/// Result of a list run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSummary {
    pub total: usize,
    /// Columns rendered, empty when nothing was listed.
    pub columns: Vec<String>,
}

/// List templates matching `settings.keyword` and print them as a table.
///
/// The column set is fixed from the first record; later records are
/// rendered with the same columns.
pub async fn list<S, W>(
    service: &S,
    settings: &ListSettings,
    out: &mut W,
) -> Result<ListSummary, CoreError>
where
    S: TemplateService,
    W: Write,
{
    let mut query = ListTemplates::all();
    if let Some(keyword) = settings.filter() {
        query = query.with_keyword(keyword);
    }

    let templates = service.list_templates(&query).await?;
    writeln!(out, "total: {}", templates.len())?;

    let Some(first) = templates.first() else {
        return Ok(ListSummary::default());
    };

    let columns = select_columns(first, &settings.columns);
    if columns.is_empty() {
        warn!("no visible columns selected");
        return Ok(ListSummary {
            total: templates.len(),
            columns: Vec::new(),
        });
    }
    debug!(columns = ?columns.iter().map(|c| c.name()).collect::<Vec<_>>(), "rendering");

    writeln!(out, "{}", render_table(&templates, &columns))?;

    Ok(ListSummary {
        total: templates.len(),
        columns: columns.iter().map(|c| c.name().to_owned()).collect(),
    })
}
