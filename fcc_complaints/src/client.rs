//! Query facade: resolved credentials plus one outbound request per query.

use fcc_complaints_api::types::Record;
use fcc_complaints_api::{BasicAuth, Client, SodaQuery};

use crate::config::Config;
use crate::error::FccError;
use crate::filter::{FilterFormatter, FilterSet};

/// Password used when none is supplied or configured. Not a secret; the
/// remote client only needs the field to be non-empty.
pub const FALLBACK_PASSWORD: &str = "AFakePassword";

/// Credentials passed explicitly by the caller. Each field, when set and
/// non-empty, takes precedence over the `[auth]` section of the config.
#[derive(Clone, Default)]
pub struct Credentials {
    pub app_token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn with_app_token(mut self, app_token: &str) -> Self {
        self.app_token = Some(app_token.to_string());
        self
    }

    pub fn with_username(mut self, username: &str) -> Self {
        self.username = Some(username.to_string());
        self
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_token", &self.app_token.as_ref().map(|_| "***"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Client for the FCC complaints dataset.
///
/// Credentials resolve per field: explicit argument, then config, then (for
/// the password only) [`FALLBACK_PASSWORD`]. Username and password reach the
/// remote client only when an app token is present; without one every
/// request is anonymous.
pub struct FccApi {
    inner: Client,
    app_token: Option<String>,
    username: Option<String>,
    password: String,
    domain: String,
    resource: String,
    region: String,
}

impl FccApi {
    /// Creates a client for the domain named in `[api] DOMAIN`.
    pub fn new(config: &Config, credentials: Credentials) -> Result<Self, FccError> {
        Self::build(config, credentials, None)
    }

    /// Creates a client with a custom base URL. Used for testing.
    pub fn with_base_url(
        base_url: &str,
        config: &Config,
        credentials: Credentials,
    ) -> Result<Self, FccError> {
        Self::build(config, credentials, Some(base_url))
    }

    fn build(
        config: &Config,
        credentials: Credentials,
        base_url: Option<&str>,
    ) -> Result<Self, FccError> {
        let app_token = resolve(credentials.app_token, config, "app_token");
        let username = resolve(credentials.username, config, "username");
        let password = resolve(credentials.password, config, "password")
            .unwrap_or_else(|| FALLBACK_PASSWORD.to_string());

        let domain = config.get("api", "DOMAIN")?.to_string();
        let resource = config.get("api", "RESOURCE")?.to_string();
        let region = config.get("default", "REGION")?.to_string();

        let auth = match (&app_token, &username) {
            (Some(_), Some(username)) => Some(BasicAuth {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        };
        tracing::debug!(
            "Connecting to {} (resource {}, authenticated: {})",
            domain,
            resource,
            auth.is_some()
        );

        let inner = match base_url {
            Some(base_url) => Client::with_base_url(base_url, app_token.clone(), auth)?,
            None => Client::new(&domain, app_token.clone(), auth)?,
        };

        Ok(Self {
            inner,
            app_token,
            username,
            password,
            domain,
            resource,
            region,
        })
    }

    pub fn app_token(&self) -> Option<&str> {
        self.app_token.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Whether username and password are sent with requests.
    pub fn is_authenticated(&self) -> bool {
        self.inner.auth().is_some()
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Formats `filters` and fetches the matching complaints.
    pub async fn query(&self, filters: &FilterSet) -> Result<Vec<Record>, FccError> {
        self.query_with(filters, SodaQuery::default()).await
    }

    /// Like [`FccApi::query`], with extra SoQL clauses. Formatted filters
    /// replace any equality filters of the same name already in `query`.
    pub async fn query_with(
        &self,
        filters: &FilterSet,
        query: SodaQuery,
    ) -> Result<Vec<Record>, FccError> {
        let formatted = FilterFormatter::new(&self.region).format(filters)?;
        let query = query.with_filters(formatted);
        Ok(self.inner.get(&self.resource, &query).await?)
    }
}

fn resolve(explicit: Option<String>, config: &Config, key: &str) -> Option<String> {
    explicit
        .filter(|v| !v.is_empty())
        .or_else(|| config.get_non_empty("auth", key).map(str::to_string))
}
