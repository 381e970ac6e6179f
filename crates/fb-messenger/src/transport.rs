//! HTTP transport for the Graph API
//!
//! Components only see the `Transport` trait; `HttpTransport` is the
//! reqwest-backed implementation used outside of tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::MessengerConfig;
use crate::error::{MessengerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// One Graph API call relative to the transport's base URL
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
    pub method: Method,
    pub path: &'a str,
    pub query: Vec<(&'a str, &'a str)>,
    pub body: Option<Value>,
}

impl<'a> ApiRequest<'a> {
    pub fn new(method: Method, path: &'a str) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            body: None,
        }
    }

    /// Attach the access token as the `access_token` query parameter
    pub fn access_token(mut self, token: &'a str) -> Self {
        self.query.push(("access_token", token));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Parsed response: status code plus JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// `Value::Null` when the response had no body
    pub body: Value,
}

/// The HTTP collaborator every component dispatches through
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, request: ApiRequest<'_>) -> Result<ApiResponse>;
}

/// reqwest implementation of [`Transport`]
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport against `base_url` with the given request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(MessengerError::Request)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &MessengerConfig) -> Result<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, request: ApiRequest<'_>) -> Result<ApiResponse> {
        let url = self.url(request.path);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!("{} {}", request.method.as_str(), url);

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        debug!("Graph API response: {} ({} bytes)", status, text.len());

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| {
                MessengerError::MalformedResponse(format!(
                    "Status: {}, body is not JSON ({}): {}",
                    status,
                    e,
                    body_excerpt(&text)
                ))
            })?
        };

        Ok(ApiResponse { status, body })
    }
}

/// Longest stretch of a response body quoted in error text
const BODY_EXCERPT_CHARS: usize = 200;

fn body_excerpt(text: &str) -> String {
    match text.char_indices().nth(BODY_EXCERPT_CHARS) {
        Some((end, _)) => format!("{}... ({} bytes total)", &text[..end], text.len()),
        None => text.to_string(),
    }
}
