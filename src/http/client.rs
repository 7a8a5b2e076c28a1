//! HTTP verb tools
//!
//! One call per verb, each normalized into an [`HttpResponse`]. Non-2xx statuses
//! are reported through `status_code`, never as errors. Transport failures and
//! body-parsing failures on GET, POST and PUT are returned as errors; DELETE
//! treats an empty or non-JSON body as absent.

use reqwest::{Client, Method};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info};

use crate::core::config::HttpConfig;
use crate::core::Result;
use crate::http::response::{HttpResponse, ResponseBody};

/// How to treat a body that is not JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyPolicy {
    Strict,
    Lenient,
}

/// Client for the four HTTP tools
#[derive(Clone, Default)]
pub struct HttpTools {
    client: Client,
}

impl HttpTools {
    /// Create tools over a default client (no timeout)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create tools from configuration
    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        let mut builder = Client::builder();

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(ref user_agent) = config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Send a GET request and return status code + parsed JSON body
    pub async fn get_request(&self, url: &str) -> Result<HttpResponse> {
        self.dispatch(Method::GET, url, None, BodyPolicy::Strict).await
    }

    /// Send a POST request with a JSON body and return status code + parsed JSON body
    pub async fn post_request(&self, url: &str, body: &Map<String, Value>) -> Result<HttpResponse> {
        self.dispatch(Method::POST, url, Some(body), BodyPolicy::Strict).await
    }

    /// Send a PUT request with a JSON body and return status code + parsed JSON body
    pub async fn put_request(&self, url: &str, body: &Map<String, Value>) -> Result<HttpResponse> {
        self.dispatch(Method::PUT, url, Some(body), BodyPolicy::Strict).await
    }

    /// Send a DELETE request and return status code + parsed JSON body, if any
    pub async fn delete_request(&self, url: &str) -> Result<HttpResponse> {
        self.dispatch(Method::DELETE, url, None, BodyPolicy::Lenient).await
    }

    async fn dispatch(
        &self,
        method: Method,
        url: &str,
        body: Option<&Map<String, Value>>,
        policy: BodyPolicy,
    ) -> Result<HttpResponse> {
        info!("{}: {}", method, url);

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status_code = response.status().as_u16();
        let bytes = response.bytes().await?;
        debug!(status_code, len = bytes.len(), "response received");

        let body = match policy {
            BodyPolicy::Strict => ResponseBody::parse(&bytes)?,
            BodyPolicy::Lenient => ResponseBody::parse_lenient(&bytes)?,
        };

        Ok(HttpResponse::new(status_code, body))
    }
}
