// Session authentication
//
// Username/password login for servers where no API key pair is issued.
// The login response carries a session key that must accompany every
// later request, and sets a JSESSIONID cookie held in the client's jar.

use secrecy::ExposeSecret;
use tracing::debug;

use crate::auth::Credentials;
use crate::client::{CloudStackClient, parse_envelope};
use crate::error::Error;
use crate::models::LoginResponse;

impl CloudStackClient {
    /// Log in with the session credentials this client was built with.
    ///
    /// `POST command=login` (form body). A no-op for API key clients.
    pub async fn login(&self) -> Result<(), Error> {
        let Credentials::Session {
            username,
            password,
            domain,
        } = self.credentials()
        else {
            return Ok(());
        };

        debug!(username = %username, domain = %domain, "logging in");

        let form = [
            ("command", "login"),
            ("username", username.as_str()),
            ("password", password.expose_secret()),
            ("domain", domain.as_str()),
            ("response", "json"),
        ];

        let resp = self
            .http()
            .post(self.endpoint().clone())
            .form(&form)
            .send()
            .await
            .map_err(Error::Transport)?;

        let login: LoginResponse = parse_envelope("login", resp).await.map_err(|e| match e {
            Error::Api { code, message } => Error::Authentication {
                message: format!("login failed ({code}): {message}"),
            },
            other => other,
        })?;

        self.set_session_key(Some(login.sessionkey));
        debug!("login successful");
        Ok(())
    }

    /// End the current session. A no-op for API key clients.
    pub async fn logout(&self) -> Result<(), Error> {
        if !matches!(self.credentials(), Credentials::Session { .. }) {
            return Ok(());
        }
        debug!("logging out");
        let _: serde_json::Value = self.request("logout", &[]).await?;
        self.set_session_key(None);
        Ok(())
    }
}
