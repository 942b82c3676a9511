// Credentials and request signing
//
// CloudStack accepts either an API key pair, where every request carries
// an HMAC-SHA1 signature of its sorted query string, or a username/password
// login that yields a session key plus a JSESSIONID cookie.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;

use crate::error::Error;

type HmacSha1 = Hmac<Sha1>;

/// Characters left untouched when encoding a parameter value.
///
/// Matches the server's re-encoding before it verifies a signature: `*` is
/// kept, `~` is escaped, space becomes `%20`. `%` is kept so values the
/// caller already escaped (`%25`, `%3A`, ...) reach the server verbatim.
const PARAM_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'*')
    .remove(b'%');

/// Credentials for authenticating with a CloudStack management server.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// API key pair. Requests are signed with the secret key.
    ApiKey {
        api_key: String,
        secret_key: SecretString,
    },
    /// Username/password login. The session key and cookie are captured
    /// on login and replayed on every request.
    Session {
        username: String,
        password: SecretString,
        domain: String,
    },
}

impl Credentials {
    /// Short label for logging, never includes secret material.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ApiKey { .. } => "apikey",
            Self::Session { .. } => "session",
        }
    }
}

/// Percent-encode a single query parameter value.
pub fn encode_value(value: &str) -> String {
    utf8_percent_encode(value, PARAM_VALUE).to_string()
}

/// Join encoded `(name, value)` pairs into a query string sorted by name.
pub fn canonical_query(mut pairs: Vec<(String, String)>) -> String {
    pairs.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()));
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Compute the base64 HMAC-SHA1 signature of a canonical query string.
///
/// The server lowercases the whole string before verifying, so we do too.
pub fn sign(query: &str, secret_key: &SecretString) -> Result<String, Error> {
    let mut mac = HmacSha1::new_from_slice(secret_key.expose_secret().as_bytes()).map_err(|e| {
        Error::Authentication {
            message: format!("invalid secret key: {e}"),
        }
    })?;
    mac.update(query.to_lowercase().as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Percent-encode a signature for use as a query parameter value.
pub fn encode_signature(signature: &str) -> String {
    utf8_percent_encode(signature, NON_ALPHANUMERIC).to_string()
}
