//! Authenticated HTTP client for the GitHub REST API.

use crate::error::PublishError;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder};
use std::sync::OnceLock;

/// Public GitHub API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Media type pinning the REST API version
pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// One-time initialization guard for the rustls crypto provider
static RUSTLS_INITIALIZED: OnceLock<()> = OnceLock::new();

/// HTTP client carrying the authorization and API-version headers
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: String,
    default_headers: HeaderMap,
}

impl GitHubClient {
    /// Create a client for `api_url` authenticated with `token`
    pub fn new(token: &str, api_url: impl Into<String>) -> Result<Self, PublishError> {
        RUSTLS_INITIALIZED.get_or_init(|| {
            // Fails only if another provider won the race, which is fine.
            let _ = rustls::crypto::ring::default_provider().install_default();
        });

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            PublishError::ClientInit {
                reason: format!("token is not a valid header value: {e}"),
            }
        })?;
        auth.set_sensitive(true);

        let mut default_headers = HeaderMap::new();
        default_headers.insert(AUTHORIZATION, auth);
        default_headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_MEDIA_TYPE));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("kodegen_release/", env!("CARGO_PKG_VERSION"))),
        );

        let http = Client::builder()
            .build()
            .map_err(|e| PublishError::ClientInit {
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            default_headers,
        })
    }

    /// Absolute URL for an API path such as `repos/o/r/releases`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Combine per-call headers with the client's headers.
    ///
    /// The client's headers are applied last, so a per-call header can never
    /// replace the authorization or accept header.
    pub fn merge_headers(&self, mut extra: HeaderMap) -> HeaderMap {
        for (name, value) in &self.default_headers {
            extra.insert(name.clone(), value.clone());
        }
        extra
    }

    /// Start a POST request to `url` with merged headers
    pub fn post(&self, url: &str, extra: HeaderMap) -> RequestBuilder {
        log::debug!("POST {}", url);
        self.http.post(url).headers(self.merge_headers(extra))
    }
}
