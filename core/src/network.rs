//! Single HTTP round trips.
//!
//! # Design
//! `Network` is the seam between the request queue and the wire. It is
//! synchronous; the queue runs it on dispatcher threads. `UreqNetwork` is the
//! default implementation. Status codes are returned as data, never as
//! errors, so the response builder decides what a failure status means.

use std::time::Duration;

use crate::error::VolleyerError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP request and buffers the whole response.
pub trait Network: Send + Sync {
    fn perform_request(&self, request: &HttpRequest) -> Result<HttpResponse, VolleyerError>;
}

/// `Network` backed by a ureq agent.
#[derive(Clone)]
pub struct UreqNetwork {
    agent: ureq::Agent,
}

impl UreqNetwork {
    pub fn new() -> Self {
        Self::build(None)
    }

    /// A network whose requests fail with `VolleyerError::Network` once
    /// `timeout` has elapsed.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqNetwork {
    fn default() -> Self {
        Self::new()
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

impl Network for UreqNetwork {
    fn perform_request(&self, request: &HttpRequest) -> Result<HttpResponse, VolleyerError> {
        let url = request.url.as_str();
        let headers = &request.headers;
        let body = request.body.as_deref();

        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url), headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(url), headers).call(),
            HttpMethod::Head => with_headers(self.agent.head(url), headers).call(),
            HttpMethod::Options => with_headers(self.agent.options(url), headers).call(),
            HttpMethod::Trace => with_headers(self.agent.trace(url), headers).call(),
            HttpMethod::Post => send(with_headers(self.agent.post(url), headers), body),
            HttpMethod::Put => send(with_headers(self.agent.put(url), headers), body),
            HttpMethod::Patch => send(with_headers(self.agent.patch(url), headers), body),
        };
        let mut response = result.map_err(|e| VolleyerError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| VolleyerError::Network(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn send(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    body: Option<&[u8]>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(bytes) => builder.send(bytes),
        None => builder.send_empty(),
    }
}
