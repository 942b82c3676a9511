//! Readiness polling for a freshly registered template.

use std::io::Write;
use std::time::Duration;

use cstemplate_api::ListTemplates;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::format::{format_duration, format_size};
use crate::service::TemplateService;

/// Terminal state of a polling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The server reported the template ready.
    Ready { elapsed: Duration, size: u64 },
    /// The template disappeared (registration failed or it was deleted).
    NotFound,
}

/// Polls `listTemplates` for one id at a fixed interval until the template
/// is ready or gone.
///
/// There is no upper bound on the number of attempts; interrupting the
/// process is the way to give up.
#[derive(Debug, Clone)]
pub struct StatusPoller {
    interval: Duration,
}

impl Default for StatusPoller {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

impl StatusPoller {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait for template `id`, reporting progress to `out`.
    ///
    /// Elapsed time advances by one interval per unready observation, so the
    /// reported cost is a multiple of the interval.
    pub async fn wait_until_ready<S, W>(
        &self,
        service: &S,
        id: &str,
        out: &mut W,
    ) -> Result<PollOutcome, CoreError>
    where
        S: TemplateService,
        W: Write,
    {
        let query = ListTemplates::all().with_id(id);
        let mut elapsed = Duration::ZERO;
        let mut first_attempt = true;

        loop {
            let templates = service.list_templates(&query).await?;

            let Some(template) = templates.first() else {
                writeln!(out, "id not exist {id}")?;
                info!(id, "template no longer exists");
                return Ok(PollOutcome::NotFound);
            };

            if template.isready {
                let size = template.size.unwrap_or_default();
                writeln!(
                    out,
                    "IsReady: true, cost {}, template size is {}",
                    format_duration(elapsed.as_secs()),
                    format_size(size)
                )?;
                info!(id, elapsed_secs = elapsed.as_secs(), size, "template ready");
                return Ok(PollOutcome::Ready { elapsed, size });
            }

            if first_attempt {
                writeln!(out, "waiting")?;
                out.flush()?;
                first_attempt = false;
            }
            debug!(id, elapsed_secs = elapsed.as_secs(), status = ?template.status, "not ready");

            elapsed += self.interval;
            tokio::time::sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::workflow::fake::{Call, FakeService, template};

    const GIB: u64 = 1 << 30;

    #[tokio::test(start_paused = true)]
    async fn ready_after_one_interval() {
        let service = FakeService::default().with_listings(vec![
            vec![template("tpl-1", false, None)],
            vec![template("tpl-1", true, Some(GIB))],
        ]);
        let mut out = Vec::new();

        let outcome = StatusPoller::default()
            .wait_until_ready(&service, "tpl-1", &mut out)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            PollOutcome::Ready {
                elapsed: Duration::from_secs(30),
                size: GIB
            }
        );
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "waiting\nIsReady: true, cost 30s, template size is 1.0GB\n"
        );
        assert_eq!(service.count(|c| matches!(c, Call::ListTemplates(_))), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn waiting_is_printed_once() {
        let service = FakeService::default().with_listings(vec![
            vec![template("tpl-1", false, None)],
            vec![template("tpl-1", false, None)],
            vec![template("tpl-1", false, None)],
            vec![template("tpl-1", true, Some(512))],
        ]);
        let mut out = Vec::new();

        let outcome = StatusPoller::default()
            .wait_until_ready(&service, "tpl-1", &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("waiting").count(), 1);
        assert!(text.ends_with("cost 1m30s, template size is 0.5KB\n"), "{text}");
        assert!(matches!(outcome, PollOutcome::Ready { elapsed, .. } if elapsed.as_secs() == 90));
    }

    #[tokio::test(start_paused = true)]
    async fn ready_immediately_skips_waiting() {
        let service =
            FakeService::default().with_listings(vec![vec![template("tpl-1", true, Some(2 * GIB))]]);
        let mut out = Vec::new();

        StatusPoller::default()
            .wait_until_ready(&service, "tpl-1", &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "IsReady: true, cost , template size is 2.0GB\n"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn vanished_template_is_not_found() {
        let service = FakeService::default()
            .with_listings(vec![vec![template("tpl-1", false, None)], vec![]]);
        let mut out = Vec::new();

        let outcome = StatusPoller::default()
            .wait_until_ready(&service, "tpl-1", &mut out)
            .await
            .unwrap();

        assert_eq!(outcome, PollOutcome::NotFound);
        assert_eq!(String::from_utf8(out).unwrap(), "waiting\nid not exist tpl-1\n");
    }

    #[tokio::test(start_paused = true)]
    async fn polls_by_id_with_all_filter() {
        let service = FakeService::default().with_listings(vec![vec![]]);
        let mut out = Vec::new();

        StatusPoller::default()
            .wait_until_ready(&service, "tpl-9", &mut out)
            .await
            .unwrap();

        assert_eq!(
            service.calls(),
            vec![Call::ListTemplates(ListTemplates::all().with_id("tpl-9"))]
        );
    }
}
