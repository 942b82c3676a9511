//! Template registration: resolve catalog ids, submit, wait for readiness.

use std::io::Write;

use cstemplate_api::RegisterTemplate;
use tracing::{info, warn};

use crate::config::{RegisterSettings, TemplateSource};
use crate::error::CoreError;
use crate::escape::{escape_keyword, escape_source_url};
use crate::service::TemplateService;
use crate::workflow::poller::StatusPoller;

/// Result of a register run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterSummary {
    /// Number of templates attempted.
    pub processed: usize,
    /// Ids of templates the server accepted.
    pub registered: Vec<String>,
}

/// Resolve an OS type search term to its catalog id.
///
/// An empty term never matches; the server would otherwise treat it as no
/// filter and return the whole catalog.
pub async fn resolve_os_type<S: TemplateService>(
    service: &S,
    ostype: &str,
) -> Result<String, CoreError> {
    if ostype.trim().is_empty() {
        return Err(CoreError::OsTypeNotFound {
            name: ostype.to_owned(),
        });
    }
    let matches = service.list_os_types(&escape_keyword(ostype)).await?;
    if matches.len() > 1 {
        warn!(ostype, count = matches.len(), "several OS types match, using the first");
    }
    matches
        .into_iter()
        .next()
        .map(|os| os.id)
        .ok_or_else(|| CoreError::OsTypeNotFound {
            name: ostype.to_owned(),
        })
}

/// Resolve a zone search term to its id. An empty term never matches.
pub async fn resolve_zone<S: TemplateService>(
    service: &S,
    zonename: &str,
) -> Result<String, CoreError> {
    if zonename.trim().is_empty() {
        return Err(CoreError::ZoneNotFound {
            name: zonename.to_owned(),
        });
    }
    let matches = service.list_zones(&escape_keyword(zonename)).await?;
    if matches.len() > 1 {
        warn!(zonename, count = matches.len(), "several zones match, using the first");
    }
    matches
        .into_iter()
        .next()
        .map(|zone| zone.id)
        .ok_or_else(|| CoreError::ZoneNotFound {
            name: zonename.to_owned(),
        })
}

/// Register every template in `settings`, polling each until ready.
///
/// OS type and zone are resolved once up front; a missing match aborts the
/// run before any template is submitted. Failures for an individual
/// template are reported to `out` and the run moves on.
pub async fn register<S, W>(
    service: &S,
    settings: &RegisterSettings,
    poller: &StatusPoller,
    out: &mut W,
) -> Result<RegisterSummary, CoreError>
where
    S: TemplateService,
    W: Write,
{
    let os_type_id = resolve_os_type(service, &settings.ostype).await?;
    let zone_id = resolve_zone(service, &settings.zonename).await?;
    info!(
        %os_type_id,
        %zone_id,
        count = settings.templates.len(),
        poll_secs = poller.interval().as_secs(),
        "registering templates"
    );

    let mut summary = RegisterSummary::default();

    for source in &settings.templates {
        summary.processed += 1;
        writeln!(out, "{} {}", source.name, source.url)?;

        let request = build_request(settings, source, &os_type_id, &zone_id);
        let template = match service.register_template(&request).await {
            Ok(template) => template,
            Err(err) => {
                warn!(name = %source.name, error = %err, "registration failed");
                writeln!(out, "{err}")?;
                continue;
            }
        };

        writeln!(out, "return template id :  {}", template.id)?;
        summary.registered.push(template.id.clone());

        match poller.wait_until_ready(service, &template.id, out).await {
            Ok(_) => {}
            Err(CoreError::Output(err)) => return Err(CoreError::Output(err)),
            Err(err) => {
                warn!(id = %template.id, error = %err, "status polling failed");
                writeln!(out, "{err}")?;
            }
        }
    }

    writeln!(out, "register {} templates.", summary.processed)?;
    Ok(summary)
}

fn build_request(
    settings: &RegisterSettings,
    source: &TemplateSource,
    os_type_id: &str,
    zone_id: &str,
) -> RegisterTemplate {
    RegisterTemplate {
        name: source.name.clone(),
        display_text: source.name.clone(),
        format: settings.format.clone(),
        hypervisor: settings.hypervisor.clone(),
        os_type_id: os_type_id.to_owned(),
        url: escape_source_url(&source.url),
        zone_id: zone_id.to_owned(),
        is_public: true,
        password_enabled: settings.password_enabled,
    }
}
