//! Canned network and contexts for unit tests.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::context::{VolleyerConfiguration, VolleyerContext};
use crate::error::VolleyerError;
use crate::http::{HttpRequest, HttpResponse};
use crate::network::Network;
use crate::queue::RequestQueue;

/// Answers every request with the same outcome and records what it saw.
pub(crate) struct StubNetwork {
    outcome: Result<HttpResponse, VolleyerError>,
    recorded: Arc<Mutex<Vec<HttpRequest>>>,
}

impl StubNetwork {
    pub(crate) fn ok(content_type: &str, body: &str) -> Self {
        Self::status(200, content_type, body)
    }

    pub(crate) fn status(status: u16, content_type: &str, body: &str) -> Self {
        Self::with_outcome(Ok(HttpResponse {
            status,
            headers: vec![("Content-Type".to_string(), content_type.to_string())],
            body: body.as_bytes().to_vec(),
        }))
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self::with_outcome(Err(VolleyerError::Network(message.to_string())))
    }

    fn with_outcome(outcome: Result<HttpResponse, VolleyerError>) -> Self {
        Self {
            outcome,
            recorded: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn recorded(&self) -> Arc<Mutex<Vec<HttpRequest>>> {
        Arc::clone(&self.recorded)
    }
}

impl Network for StubNetwork {
    fn perform_request(&self, request: &HttpRequest) -> Result<HttpResponse, VolleyerError> {
        self.recorded.lock().push(request.clone());
        self.outcome.clone()
    }
}

pub(crate) fn context_with(network: StubNetwork) -> Arc<VolleyerContext> {
    let queue = RequestQueue::with_dispatchers(Arc::new(network), 1);
    Arc::new(VolleyerContext::new(Arc::new(queue)))
}

pub(crate) fn context_with_error_listener(
    network: StubNetwork,
    listener: impl Fn(VolleyerError) + Send + Sync + 'static,
) -> Arc<VolleyerContext> {
    let queue = RequestQueue::with_dispatchers(Arc::new(network), 1);
    let configuration = VolleyerConfiguration::builder().error_listener(listener).build();
    Arc::new(VolleyerContext::with_configuration(Arc::new(queue), configuration))
}

pub(crate) fn stub_context() -> Arc<VolleyerContext> {
    context_with(StubNetwork::ok("text/plain", ""))
}
