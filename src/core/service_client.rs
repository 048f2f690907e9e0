// src/core/service_client.rs
//! Authenticated HTTP transport for the SharpAPI endpoints

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use tracing::{debug, error, trace};

use crate::config::SharpApiConfig;
use crate::error::{Result, SharpApiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A request against the API. `target` is either a path relative to the
/// base URL (`/hr/related_job_positions`) or an absolute URL such as a
/// job status URL handed out by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub target: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            target: path.into(),
            body: Some(body),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            target: url.into(),
            body: None,
        }
    }
}

/// Successful (2xx) response as seen by callers of a [`Transport`]
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn json<R>(&self) -> Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        serde_json::from_str(&self.body).map_err(|e| {
            SharpApiError::InvalidResponse(format!("{}. Raw response: {}", e, self.body))
        })
    }
}

/// Request dispatch seam. Implementations return `Err` for network failures
/// and non-2xx statuses; they never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// reqwest-backed transport carrying the key, base URL and user agent
pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    pub fn new(config: &SharpApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key()))
            .map_err(|_| {
                SharpApiError::Configuration("API key contains invalid characters".to_string())
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent())
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URLs pass through, paths are joined onto the base URL
    pub fn resolve_url(&self, target: &str) -> String {
        resolve_url(&self.base_url, target)
    }
}

#[async_trait]
impl Transport for ServiceClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.resolve_url(&request.target);

        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        debug!("Calling SharpAPI: {:?} {}", request.method, url);

        let response = builder.send().await?;
        let status = response.status();
        trace!("Response status: {}", status);

        let body = response.text().await?;

        if status.is_success() {
            Ok(ApiResponse {
                status: status.as_u16(),
                body,
            })
        } else {
            error!("SharpAPI error response {}: {}", status, body);
            Err(SharpApiError::Http {
                status: status.as_u16(),
                body,
            })
        }
    }
}

fn resolve_url(base_url: &str, target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        target.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            target.trim_start_matches('/')
        )
    }
}
