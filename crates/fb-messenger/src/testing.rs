//! In-memory transport for unit tests

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

/// A request as seen by [`FakeTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Replies with a canned body and records every request it receives
pub struct FakeTransport {
    status: u16,
    body: Value,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn replying(body: Value) -> Self {
        Self::with_status(200, body)
    }

    pub fn with_status(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn call(&self, request: ApiRequest<'_>) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method,
            path: request.path.to_string(),
            query: request
                .query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: request.body,
        });

        Ok(ApiResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}
