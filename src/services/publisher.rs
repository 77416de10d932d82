//! Fan-out of a resolved status to every configured account.
//!
//! Credentials come from the environment on every publish, so rotating
//! them does not require restarting the loop. Each account is updated
//! independently: one failing account never stops the others.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{error, info};

use crate::constants::{CREDENTIALS_ENV_VAR, PUBLISH_TIMEOUT, STATUS_ENDPOINT};

/// Splits a credential list on `,`, `;`, and newlines, dropping blanks.
pub fn parse_credentials(raw: &str) -> Vec<String> {
    raw.split([',', ';', '\n'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Where the publisher finds its credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Read and parse the named environment variable on every publish.
    Env(String),
    /// A fixed credential list.
    Fixed(Vec<String>),
}

impl CredentialSource {
    /// The credentials currently configured.
    pub fn credentials(&self) -> Vec<String> {
        match self {
            Self::Env(var) => std::env::var(var)
                .map(|raw| parse_credentials(&raw))
                .unwrap_or_default(),
            Self::Fixed(credentials) => credentials.clone(),
        }
    }
}

impl Default for CredentialSource {
    fn default() -> Self {
        Self::Env(CREDENTIALS_ENV_VAR.to_string())
    }
}

/// The custom status payload of a settings update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CustomStatus<'a> {
    /// Status text
    pub text: &'a str,
    /// Emoji shown next to the text
    pub emoji_name: &'a str,
}

#[derive(Serialize)]
struct SettingsPatch<'a> {
    custom_status: CustomStatus<'a>,
}

/// Sends one status update for one account.
pub trait StatusClient {
    /// Updates the account behind `credential`; any non-2xx answer is an error.
    fn update(&self, credential: &str, status: CustomStatus<'_>) -> Result<()>;
}

/// Blocking HTTP implementation of [`StatusClient`].
#[derive(Debug, Clone)]
pub struct HttpStatusClient {
    agent: ureq::Agent,
    endpoint: String,
}

impl HttpStatusClient {
    /// Creates a client for the public settings endpoint.
    pub fn new() -> Self {
        Self::with_endpoint(STATUS_ENDPOINT)
    }

    /// Creates a client for a custom endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(PUBLISH_TIMEOUT).build();
        Self {
            agent,
            endpoint: endpoint.into(),
        }
    }
}

impl Default for HttpStatusClient {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusClient for HttpStatusClient {
    fn update(&self, credential: &str, status: CustomStatus<'_>) -> Result<()> {
        let body = serde_json::to_string(&SettingsPatch {
            custom_status: status,
        })
        .context("Failed to encode status")?;

        let result = self
            .agent
            .request("PATCH", &self.endpoint)
            .set("Authorization", credential)
            .set("Content-Type", "application/json")
            .send_string(&body);

        match result {
            Ok(response) if (200..300).contains(&response.status()) => Ok(()),
            Ok(response) => bail!("HTTP {}", response.status()),
            Err(ureq::Error::Status(code, _)) => bail!("HTTP {code}"),
            Err(e) => Err(e).context("Status update request failed"),
        }
    }
}

/// Pushes a status to every account.
pub trait StatusPublisher {
    /// Publishes `emoji`/`text`; true only if every account was updated.
    fn publish(&self, emoji: &str, text: &str) -> bool;
}

/// Publisher updating each configured account through a [`StatusClient`].
#[derive(Debug, Clone)]
pub struct AccountPublisher<C> {
    client: C,
    credentials: CredentialSource,
}

impl<C: StatusClient> AccountPublisher<C> {
    /// Creates a publisher with an explicit credential source.
    pub fn new(client: C, credentials: CredentialSource) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Creates a publisher reading `DISCORD_TOKENS`.
    pub fn from_env(client: C) -> Self {
        Self::new(client, CredentialSource::default())
    }

    /// The underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: StatusClient> StatusPublisher for AccountPublisher<C> {
    fn publish(&self, emoji: &str, text: &str) -> bool {
        let credentials = self.credentials.credentials();
        if credentials.is_empty() {
            error!("No credentials configured ({CREDENTIALS_ENV_VAR} is empty)");
            return false;
        }

        let status = CustomStatus {
            text,
            emoji_name: emoji,
        };

        let mut success = true;
        for (index, credential) in credentials.iter().enumerate() {
            match self.client.update(credential, status) {
                Ok(()) => info!(account = index, "Updated status: {emoji} {text}"),
                Err(e) => {
                    error!(account = index, "Failed to update status: {e:#}");
                    success = false;
                }
            }
        }
        success
    }
}
