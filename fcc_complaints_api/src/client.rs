//! HTTP client for Socrata resource endpoints.

use std::time::Duration;

use url::Url;

use crate::{query::SodaQuery, types::Record, user_agent::get_user_agent, Error};

/// Request timeout for resource queries.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Username and password sent as HTTP basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// HTTP client for a single Socrata domain.
///
/// Requests carry the `X-App-Token` header when an app token is set and
/// basic auth when credentials are set. Each call issues exactly one request;
/// there is no retry and no pagination.
pub struct Client {
    client: reqwest::Client,
    /// Base URL for the domain, e.g. `https://opendata.fcc.gov`.
    base_api_url: String,
    app_token: Option<String>,
    auth: Option<BasicAuth>,
}

impl Client {
    /// Creates a client for `domain` (a bare host name such as `opendata.fcc.gov`).
    pub fn new(
        domain: &str,
        app_token: Option<String>,
        auth: Option<BasicAuth>,
    ) -> Result<Self, Error> {
        Self::with_base_url(&format!("https://{}", domain), app_token, auth)
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(
        base_url: &str,
        app_token: Option<String>,
        auth: Option<BasicAuth>,
    ) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed(e)
            })?;
        Ok(Self {
            client,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            app_token,
            auth,
        })
    }

    pub fn app_token(&self) -> Option<&str> {
        self.app_token.as_deref()
    }

    pub fn auth(&self) -> Option<&BasicAuth> {
        self.auth.as_ref()
    }

    fn get_url(&self, resource: &str, query: &SodaQuery) -> Result<Url, Error> {
        let url = Url::parse(
            format!("{}/resource/{}.json", &self.base_api_url, resource).as_str(),
        )
        .map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e)
        })?;
        Ok(query.add_to_url(&url))
    }

    /// Fetches the rows of `resource` matching `query`.
    pub async fn get(&self, resource: &str, query: &SodaQuery) -> Result<Vec<Record>, Error> {
        let url = self.get_url(resource, query)?;
        tracing::debug!("GET {}", url);

        let mut request = self
            .client
            .get(url)
            .header("accept", "application/json");
        if let Some(token) = &self.app_token {
            request = request.header("X-App-Token", token);
        }
        if let Some(auth) = &self.auth {
            request = request.basic_auth(&auth.username, Some(&auth.password));
        }

        let resp = request.send().await.map_err(|e| {
            tracing::error!("Failed to get resource: {}", e);
            Error::RequestFailed(e)
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed(e)
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        serde_json::from_str::<Vec<Record>>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::ParseFailed(e.to_string())
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_url_has_json_suffix() {
        let client = Client::with_base_url("https://example.com/", None, None).unwrap();
        let url = client.get_url("sr6c-syda", &SodaQuery::default()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/resource/sr6c-syda.json");
    }

    #[test]
    fn domain_becomes_https_base() {
        let client = Client::new("opendata.fcc.gov", None, None).unwrap();
        let url = client.get_url("sr6c-syda", &SodaQuery::default()).unwrap();
        assert_eq!(url.host_str(), Some("opendata.fcc.gov"));
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn malformed_base_url_is_invalid_url() {
        let client = Client::with_base_url("not a url", None, None).unwrap();
        let result = client.get_url("sr6c-syda", &SodaQuery::default());
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(2500);
        let snippet = truncate_body(&body);
        assert!(snippet.ends_with("...[truncated]"));
        assert_eq!(snippet.len(), 2000 + "...[truncated]".len());
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn debug_hides_password() {
        let auth = BasicAuth {
            username: "user".to_string(),
            password: "secret".to_string(),
        };
        let shown = format!("{:?}", auth);
        assert!(shown.contains("user"));
        assert!(!shown.contains("secret"));
    }
}
