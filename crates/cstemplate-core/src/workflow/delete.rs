//! Template deletion by id.

use std::io::Write;

use tracing::{info, warn};

use crate::error::CoreError;
use crate::service::TemplateService;

/// Result of a delete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    pub processed: usize,
    pub deleted: usize,
}

/// Delete each template id in turn.
///
/// Accepted deletions print the id followed by the server's job response;
/// rejected ones print the error. Neither stops the run.
pub async fn delete<S, W>(service: &S, ids: &[String], out: &mut W) -> Result<DeleteSummary, CoreError>
where
    S: TemplateService,
    W: Write,
{
    let mut summary = DeleteSummary::default();

    for id in ids {
        summary.processed += 1;
        match service.delete_template(id).await {
            Ok(job) => {
                summary.deleted += 1;
                info!(id, jobid = ?job.jobid, "delete accepted");
                let rendered = serde_json::to_string_pretty(&job)
                    .map_err(|e| CoreError::Internal(format!("failed to render response: {e}")))?;
                writeln!(out, "{id}")?;
                writeln!(out, "{rendered}")?;
            }
            Err(err) => {
                warn!(id, error = %err, "delete failed");
                writeln!(out, "{err}")?;
            }
        }
    }

    writeln!(out, "delete {} templates.", summary.processed)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::workflow::fake::{Call, FakeService};

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[tokio::test]
    async fn one_call_per_id() {
        let service = FakeService::default();
        let mut out = Vec::new();

        let summary = delete(&service, &ids(&["a", "b", "c"]), &mut out).await.unwrap();

        assert_eq!(
            service.calls(),
            vec![
                Call::Delete("a".into()),
                Call::Delete("b".into()),
                Call::Delete("c".into()),
            ]
        );
        assert_eq!(summary, DeleteSummary { processed: 3, deleted: 3 });
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("delete 3 templates.\n"), "{text}");
    }

    #[tokio::test]
    async fn prints_id_and_pretty_response() {
        let service = FakeService::default();
        let mut out = Vec::new();

        delete(&service, &ids(&["tpl-1"]), &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "tpl-1\n{\n  \"jobid\": \"job-tpl-1\"\n}\ndelete 1 templates.\n"
        );
    }

    #[tokio::test]
    async fn failure_is_reported_and_counted() {
        let service = FakeService::default().failing_delete("gone");
        let mut out = Vec::new();

        let summary = delete(&service, &ids(&["gone", "tpl-2"]), &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("API error: Unable to find template gone\n"), "{text}");
        assert!(text.contains("tpl-2\n"));
        assert_eq!(summary, DeleteSummary { processed: 2, deleted: 1 });
    }

    #[tokio::test]
    async fn empty_input_prints_zero_count() {
        let service = FakeService::default();
        let mut out = Vec::new();

        delete(&service, &[], &mut out).await.unwrap();

        assert!(service.calls().is_empty());
        assert_eq!(String::from_utf8(out).unwrap(), "delete 0 templates.\n");
    }
}
