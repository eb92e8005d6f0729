use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::DnsApiError;

pub const DEFAULT_API_URL: &str = "https://api.formation.cloud";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Authenticated client for the formation API
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
    team_id: Option<String>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl Client {
    pub fn new(api_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("form-dns/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: None,
            team_id: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Scopes every request to a team
    pub fn with_team(mut self, team_id: Option<String>) -> Self {
        self.team_id = team_id;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn team_id(&self) -> Option<&str> {
        self.team_id.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Starts a request for `path`, with credentials and scope attached
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, DnsApiError> {
        let token = self.token.as_deref().ok_or(DnsApiError::NotAuthenticated)?;
        let url = format!("{}{}", self.api_url, path);
        log::debug!("{method} {url}");

        let mut builder = self.http.request(method, url).bearer_auth(token);
        if let Some(team) = &self.team_id {
            builder = builder.query(&[("teamId", team)]);
        }
        Ok(builder)
    }

    /// Sends the request and decodes a JSON body, mapping error statuses
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, DnsApiError> {
        let resp = request.send().await?;
        let status = resp.status();
        log::debug!("Response status {status}");

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let text = resp.text().await.unwrap_or_default();
        let err = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => DnsApiError::Api {
                status: status.as_u16(),
                code: body.error.code,
                message: body.error.message,
            },
            Err(_) => DnsApiError::Api {
                status: status.as_u16(),
                code: "unknown".to_string(),
                message: status.canonical_reason().unwrap_or("Request failed").to_string(),
            },
        };
        Err(err)
    }
}
