//! Entry point of the fluent API.

use std::sync::Arc;

use crate::builder::RequestBuilder;
use crate::context::{VolleyerConfiguration, VolleyerContext};
use crate::error::VolleyerError;
use crate::http::HttpMethod;
use crate::queue::RequestQueue;

/// Start requests against `queue` with the default configuration.
///
/// ```no_run
/// use std::sync::Arc;
/// use volleyer::{volleyer, RequestQueue, UreqNetwork};
///
/// let queue = Arc::new(RequestQueue::new(UreqNetwork::new()));
/// let text = volleyer(queue)
///     .get("http://localhost:3000/greeting")?
///     .after_request()?
///     .send()?;
/// println!("{text}");
/// # Ok::<(), volleyer::VolleyerError>(())
/// ```
pub fn volleyer(queue: Arc<RequestQueue>) -> Volleyer {
    Volleyer::new(Arc::new(VolleyerContext::new(queue)))
}

/// Creates `RequestBuilder`s that share one context.
#[derive(Clone)]
pub struct Volleyer {
    context: Arc<VolleyerContext>,
}

impl Volleyer {
    pub fn new(context: Arc<VolleyerContext>) -> Self {
        Self { context }
    }

    pub fn with_configuration(queue: Arc<RequestQueue>, configuration: VolleyerConfiguration) -> Self {
        Self::new(Arc::new(VolleyerContext::with_configuration(queue, configuration)))
    }

    pub fn context(&self) -> &Arc<VolleyerContext> {
        &self.context
    }

    pub fn request(&self, method: HttpMethod, url: impl Into<String>) -> Result<RequestBuilder, VolleyerError> {
        RequestBuilder::new(Arc::clone(&self.context), url, method)
    }

    pub fn get(&self, url: impl Into<String>) -> Result<RequestBuilder, VolleyerError> {
        self.request(HttpMethod::Get, url)
    }

    pub fn post(&self, url: impl Into<String>) -> Result<RequestBuilder, VolleyerError> {
        self.request(HttpMethod::Post, url)
    }

    pub fn put(&self, url: impl Into<String>) -> Result<RequestBuilder, VolleyerError> {
        self.request(HttpMethod::Put, url)
    }

    pub fn delete(&self, url: impl Into<String>) -> Result<RequestBuilder, VolleyerError> {
        self.request(HttpMethod::Delete, url)
    }

    pub fn patch(&self, url: impl Into<String>) -> Result<RequestBuilder, VolleyerError> {
        self.request(HttpMethod::Patch, url)
    }

    pub fn head(&self, url: impl Into<String>) -> Result<RequestBuilder, VolleyerError> {
        self.request(HttpMethod::Head, url)
    }

    pub fn options(&self, url: impl Into<String>) -> Result<RequestBuilder, VolleyerError> {
        self.request(HttpMethod::Options, url)
    }
}
