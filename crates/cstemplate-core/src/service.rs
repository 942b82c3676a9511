// ── Template service seam ──
//
// Workflows are generic over `TemplateService` so they can run against the
// real CloudStack client or an in-memory fake. Implementations receive
// search terms and URLs already escaped by the caller.

use cstemplate_api::{
    AsyncJob, CloudStackClient, Credentials, ListTemplates, OsType, RegisterTemplate, Template,
    TransportConfig, Zone,
};
use tracing::debug;

use crate::config::{AuthCredentials, ConnectionConfig};
use crate::error::CoreError;

/// The remote operations the workflows depend on.
#[allow(async_fn_in_trait)]
pub trait TemplateService {
    async fn list_os_types(&self, keyword: &str) -> Result<Vec<OsType>, CoreError>;

    async fn list_zones(&self, keyword: &str) -> Result<Vec<Zone>, CoreError>;

    async fn register_template(&self, request: &RegisterTemplate) -> Result<Template, CoreError>;

    async fn delete_template(&self, id: &str) -> Result<AsyncJob, CoreError>;

    async fn list_templates(&self, query: &ListTemplates) -> Result<Vec<Template>, CoreError>;
}

impl TemplateService for CloudStackClient {
    async fn list_os_types(&self, keyword: &str) -> Result<Vec<OsType>, CoreError> {
        Ok(CloudStackClient::list_os_types(self, keyword).await?)
    }

    async fn list_zones(&self, keyword: &str) -> Result<Vec<Zone>, CoreError> {
        Ok(CloudStackClient::list_zones(self, keyword).await?)
    }

    async fn register_template(&self, request: &RegisterTemplate) -> Result<Template, CoreError> {
        Ok(CloudStackClient::register_template(self, request).await?)
    }

    async fn delete_template(&self, id: &str) -> Result<AsyncJob, CoreError> {
        Ok(CloudStackClient::delete_template(self, id).await?)
    }

    async fn list_templates(&self, query: &ListTemplates) -> Result<Vec<Template>, CoreError> {
        Ok(CloudStackClient::list_templates(self, query).await?)
    }
}

/// Build a CloudStack client from connection settings, logging in when
/// session credentials are configured.
pub async fn connect(config: &ConnectionConfig) -> Result<CloudStackClient, CoreError> {
    let credentials = match &config.auth {
        AuthCredentials::ApiKey {
            api_key,
            secret_key,
        } => Credentials::ApiKey {
            api_key: api_key.clone(),
            secret_key: secret_key.clone(),
        },
        AuthCredentials::Credentials {
            username,
            password,
            domain,
        } => Credentials::Session {
            username: username.clone(),
            password: password.clone(),
            domain: domain.clone(),
        },
    };

    let transport = TransportConfig {
        insecure: config.insecure,
        timeout: config.timeout,
        cookie_jar: None,
    };

    debug!(
        endpoint = %config.endpoint,
        auth = credentials.kind(),
        "connecting to management server"
    );

    let client = CloudStackClient::connect(config.endpoint.clone(), credentials, &transport)
        .await
        .map_err(|e| match e {
            cstemplate_api::Error::Transport(ref te) if te.is_connect() => {
                CoreError::ConnectionFailed {
                    url: config.endpoint.to_string(),
                    reason: te.to_string(),
                }
            }
            other => CoreError::from(other),
        })?;
    Ok(client)
}

/// End a session opened by [`connect`]. A no-op for API key clients.
pub async fn disconnect(client: &CloudStackClient) -> Result<(), CoreError> {
    client.logout().await?;
    debug!("session closed");
    Ok(())
}
