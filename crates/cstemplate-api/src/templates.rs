// Template endpoints
//
// Registration is asynchronous on the server side: `registerTemplate`
// returns the new template immediately with `isready=false`, and the image
// download/processing progress is observed through `listTemplates`.

use tracing::debug;

use crate::client::CloudStackClient;
use crate::error::Error;
use crate::models::{AsyncJob, ListTemplates, RegisterTemplate, Template};

impl CloudStackClient {
    /// Register a template from a source URL.
    ///
    /// `registerTemplate` returns a one-element template list; an empty list
    /// is reported as [`Error::EmptyResponse`].
    pub async fn register_template(&self, request: &RegisterTemplate) -> Result<Template, Error> {
        debug!(name = %request.name, "registering template");
        let templates: Vec<Template> = self
            .request_list("registerTemplate", "template", &request.to_params())
            .await?;
        templates
            .into_iter()
            .next()
            .ok_or_else(|| Error::EmptyResponse {
                command: "registerTemplate".into(),
            })
    }

    /// Delete a template by id.
    ///
    /// `deleteTemplate&id={id}` -- returns the async job handle.
    pub async fn delete_template(&self, id: &str) -> Result<AsyncJob, Error> {
        debug!(id, "deleting template");
        self.request("deleteTemplate", &[("id", id.to_owned())])
            .await
    }

    /// List templates, optionally filtered by keyword or id.
    pub async fn list_templates(&self, query: &ListTemplates) -> Result<Vec<Template>, Error> {
        debug!(?query, "listing templates");
        self.request_list("listTemplates", "template", &query.to_params())
            .await
    }
}
