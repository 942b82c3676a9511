// CloudStack HTTP client
//
// Wraps `reqwest::Client` with command-style URL construction, request
// signing, and envelope unwrapping. Endpoint groups (catalog, templates,
// session) are implemented as inherent methods in separate files to keep
// this module focused on transport mechanics.

use std::sync::RwLock;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::auth::{self, Credentials};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Error object embedded in a response envelope.
///
/// Appears either as `{"errorresponse": {...}}` or inside the command's own
/// envelope, usually alongside a 4xx/5xx status.
#[derive(Deserialize)]
struct ErrorBody {
    errorcode: u16,
    #[serde(default)]
    errortext: Option<String>,
}

/// Raw HTTP client for a CloudStack management server.
///
/// Every call is a `GET {endpoint}?command=...&response=json`. Methods return
/// the unwrapped `<command>response` payload; the envelope is stripped before
/// the caller sees it.
pub struct CloudStackClient {
    http: reqwest::Client,
    endpoint: Url,
    credentials: Credentials,
    /// Captured from `loginresponse` for session-authenticated clients.
    session_key: RwLock<Option<String>>,
}

impl CloudStackClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// Session credentials need a cookie jar for `JSESSIONID`; one is added
    /// if the transport doesn't already carry one.
    pub fn new(
        endpoint: Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let config = match credentials {
            Credentials::Session { .. } if transport.cookie_jar.is_none() => {
                transport.clone().with_cookie_jar()
            }
            _ => transport.clone(),
        };
        let http = config.build_client()?;
        Ok(Self::with_client(http, endpoint, credentials))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, endpoint: Url, credentials: Credentials) -> Self {
        Self {
            http,
            endpoint,
            credentials,
            session_key: RwLock::new(None),
        }
    }

    /// Build a client and, for session credentials, log in.
    pub async fn connect(
        endpoint: Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let client = Self::new(endpoint, credentials, transport)?;
        if matches!(client.credentials, Credentials::Session { .. }) {
            client.login().await?;
        }
        Ok(client)
    }

    /// The management server API endpoint (e.g. `http://host:8080/client/api`).
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    // ── Session key management ───────────────────────────────────────

    pub(crate) fn set_session_key(&self, key: Option<String>) {
        *self.session_key.write().expect("session lock poisoned") = key;
    }

    fn session_key(&self) -> Option<String> {
        self.session_key
            .read()
            .expect("session lock poisoned")
            .clone()
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build the full query string for a command, signed when using an
    /// API key. Empty parameter values are omitted.
    pub(crate) fn build_query(
        &self,
        command: &str,
        params: &[(&str, String)],
    ) -> Result<String, Error> {
        let mut pairs: Vec<(String, String)> = params
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| ((*name).to_owned(), auth::encode_value(value)))
            .collect();
        pairs.push(("command".into(), auth::encode_value(command)));
        pairs.push(("response".into(), "json".into()));

        match &self.credentials {
            Credentials::ApiKey {
                api_key,
                secret_key,
            } => {
                pairs.push(("apikey".into(), auth::encode_value(api_key)));
                let query = auth::canonical_query(pairs);
                let signature = auth::sign(&query, secret_key)?;
                Ok(format!(
                    "{query}&signature={}",
                    auth::encode_signature(&signature)
                ))
            }
            Credentials::Session { .. } => {
                if let Some(key) = self.session_key() {
                    pairs.push(("sessionkey".into(), auth::encode_value(&key)));
                }
                Ok(auth::canonical_query(pairs))
            }
        }
    }

    fn command_url(&self, command: &str, params: &[(&str, String)]) -> Result<Url, Error> {
        let mut url = self.endpoint.clone();
        url.set_query(Some(&self.build_query(command, params)?));
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Issue a command and deserialize its unwrapped `<command>response`.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        command: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.command_url(command, params)?;
        debug!(command, "GET {}", self.endpoint);
        trace!("full request URL: {}", redact(&url));

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        parse_envelope(command, resp).await
    }

    /// Issue a list command and pull the item array out of the payload.
    ///
    /// CloudStack omits the array entirely (`{"listzonesresponse":{}}`)
    /// when nothing matches, which yields an empty `Vec`.
    pub(crate) async fn request_list<T: DeserializeOwned>(
        &self,
        command: &str,
        item_key: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let mut payload: serde_json::Map<String, Value> = self.request(command, params).await?;
        match payload.remove(item_key) {
            Some(items) => serde_json::from_value(items).map_err(|e| Error::Deserialization {
                message: format!("{command}: {e}"),
                body: String::new(),
            }),
            None => Ok(Vec::new()),
        }
    }
}

/// Strip the signature and session key from a URL before logging it.
fn redact(url: &Url) -> String {
    let query: Vec<String> = url
        .query()
        .unwrap_or_default()
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((name, _)) if name == "signature" || name == "sessionkey" => {
                format!("{name}=***")
            }
            _ => pair.to_owned(),
        })
        .collect();
    format!("{}?{}", url.path(), query.join("&"))
}

/// Parse the `{"<command>response": {...}}` envelope, returning the payload
/// on success or an `Error::Api` / `Error::Authentication` when the server
/// reports an `errorcode`.
pub(crate) async fn parse_envelope<T: DeserializeOwned>(
    command: &str,
    resp: reqwest::Response,
) -> Result<T, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;
    let preview = body
        .char_indices()
        .nth(200)
        .map_or(body.as_str(), |(end, _)| &body[..end]);

    let Ok(value) = serde_json::from_str::<Value>(&body) else {
        if !status.is_success() {
            return Err(api_error(status.as_u16(), format!("HTTP {status}: {preview}")));
        }
        return Err(Error::Deserialization {
            message: format!("response is not JSON (body preview: {preview:?})"),
            body: body.clone(),
        });
    };

    if let Some(err) = envelope_error(&value) {
        let message = err
            .errortext
            .unwrap_or_else(|| format!("errorcode={}", err.errorcode));
        return Err(api_error(err.errorcode, message));
    }

    if !status.is_success() {
        return Err(api_error(status.as_u16(), format!("HTTP {status}: {preview}")));
    }

    let key = format!("{}response", command.to_lowercase());
    let payload = value.get(&key).cloned().ok_or_else(|| Error::Deserialization {
        message: format!("missing `{key}` in response (body preview: {preview:?})"),
        body: body.clone(),
    })?;

    serde_json::from_value(payload).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {preview:?})"),
        body: body.clone(),
    })
}

fn envelope_error(value: &Value) -> Option<ErrorBody> {
    value
        .as_object()?
        .values()
        .filter(|inner| inner.get("errorcode").is_some())
        .find_map(|inner| serde_json::from_value(inner.clone()).ok())
}

fn api_error(code: u16, message: String) -> Error {
    if code == 401 {
        Error::Authentication { message }
    } else {
        Error::Api { code, message }
    }
}
