// Catalog endpoints
//
// OS types and zones are looked up by name when registering a template.
// Both commands accept a `keyword` filter matched server-side with SQL
// LIKE semantics.

use tracing::debug;

use crate::client::CloudStackClient;
use crate::error::Error;
use crate::models::{OsType, Zone};

impl CloudStackClient {
    /// Search the guest OS catalog.
    ///
    /// `listOsTypes&keyword={keyword}`
    pub async fn list_os_types(&self, keyword: &str) -> Result<Vec<OsType>, Error> {
        debug!(keyword, "listing OS types");
        self.request_list("listOsTypes", "ostype", &[("keyword", keyword.to_owned())])
            .await
    }

    /// Search the zones visible to the caller.
    ///
    /// `listZones&keyword={keyword}`
    pub async fn list_zones(&self, keyword: &str) -> Result<Vec<Zone>, Error> {
        debug!(keyword, "listing zones");
        self.request_list("listZones", "zone", &[("keyword", keyword.to_owned())])
            .await
    }
}
