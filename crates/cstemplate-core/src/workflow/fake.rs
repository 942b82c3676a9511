//! In-memory `TemplateService` that records every call.

use std::collections::VecDeque;
use std::sync::Mutex;

use cstemplate_api::{AsyncJob, ListTemplates, OsType, RegisterTemplate, Template, Zone};
use serde_json::json;

use crate::error::CoreError;
use crate::service::TemplateService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    ListOsTypes(String),
    ListZones(String),
    Register(RegisterTemplate),
    Delete(String),
    ListTemplates(ListTemplates),
}

#[derive(Default)]
pub(crate) struct FakeService {
    os_types: Vec<OsType>,
    zones: Vec<Zone>,
    /// Template names whose registration is rejected.
    failing_names: Vec<String>,
    /// Template ids whose deletion is rejected.
    failing_ids: Vec<String>,
    /// Template ids whose `listTemplates` lookup is rejected.
    failing_listing_ids: Vec<String>,
    /// Successive `listTemplates` responses; exhausted means empty.
    listings: Mutex<VecDeque<Vec<Template>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeService {
    pub fn with_os_type(mut self, id: &str, description: &str) -> Self {
        self.os_types.push(
            serde_json::from_value(json!({ "id": id, "description": description }))
                .expect("valid os type"),
        );
        self
    }

    pub fn with_zone(mut self, id: &str, name: &str) -> Self {
        self.zones.push(
            serde_json::from_value(json!({ "id": id, "name": name })).expect("valid zone"),
        );
        self
    }

    pub fn with_listings(self, listings: Vec<Vec<Template>>) -> Self {
        *self.listings.lock().expect("listings lock") = listings.into();
        self
    }

    pub fn failing_register(mut self, name: &str) -> Self {
        self.failing_names.push(name.to_owned());
        self
    }

    pub fn failing_delete(mut self, id: &str) -> Self {
        self.failing_ids.push(id.to_owned());
        self
    }

    pub fn failing_listing(mut self, id: &str) -> Self {
        self.failing_listing_ids.push(id.to_owned());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

pub(crate) fn template(id: &str, isready: bool, size: Option<u64>) -> Template {
    Template {
        id: id.to_owned(),
        name: id.to_owned(),
        isready,
        size,
        ..Template::default()
    }
}

fn rejected(message: String) -> CoreError {
    CoreError::Api {
        message,
        code: Some(431),
    }
}

impl TemplateService for FakeService {
    async fn list_os_types(&self, keyword: &str) -> Result<Vec<OsType>, CoreError> {
        self.record(Call::ListOsTypes(keyword.to_owned()));
        Ok(self.os_types.clone())
    }

    async fn list_zones(&self, keyword: &str) -> Result<Vec<Zone>, CoreError> {
        self.record(Call::ListZones(keyword.to_owned()));
        Ok(self.zones.clone())
    }

    async fn register_template(&self, request: &RegisterTemplate) -> Result<Template, CoreError> {
        self.record(Call::Register(request.clone()));
        if self.failing_names.contains(&request.name) {
            return Err(rejected(format!("cannot register {}", request.name)));
        }
        Ok(template(&format!("tpl-{}", request.name), false, None))
    }

    async fn delete_template(&self, id: &str) -> Result<AsyncJob, CoreError> {
        self.record(Call::Delete(id.to_owned()));
        if self.failing_ids.iter().any(|f| f == id) {
            return Err(rejected(format!("Unable to find template {id}")));
        }
        Ok(serde_json::from_value(json!({ "jobid": format!("job-{id}") })).expect("valid job"))
    }

    async fn list_templates(&self, query: &ListTemplates) -> Result<Vec<Template>, CoreError> {
        self.record(Call::ListTemplates(query.clone()));
        if let Some(id) = query
            .id
            .as_ref()
            .filter(|id| self.failing_listing_ids.contains(id))
        {
            return Err(rejected(format!("cannot list template {id}")));
        }
        Ok(self
            .listings
            .lock()
            .expect("listings lock")
            .pop_front()
            .unwrap_or_default())
    }
}
