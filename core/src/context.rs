//! Shared state every builder is created against.
//!
//! A `VolleyerContext` pairs the request queue with a `VolleyerConfiguration`
//! holding the defaults a `ResponseBuilder` falls back to when the caller
//! does not override them.

use std::fmt;
use std::sync::Arc;

use crate::error::VolleyerError;
use crate::parser::{default_parser, NetworkResponseParser};
use crate::queue::RequestQueue;

/// Callback receiving a failed request's error.
pub type ErrorListener = Arc<dyn Fn(VolleyerError) + Send + Sync>;

/// Defaults applied to every request made through a context.
#[derive(Clone)]
pub struct VolleyerConfiguration {
    response_parser: Arc<dyn NetworkResponseParser>,
    error_listener: ErrorListener,
}

impl VolleyerConfiguration {
    pub fn builder() -> VolleyerConfigurationBuilder {
        VolleyerConfigurationBuilder::default()
    }

    pub fn response_parser(&self) -> &Arc<dyn NetworkResponseParser> {
        &self.response_parser
    }

    pub fn error_listener(&self) -> &ErrorListener {
        &self.error_listener
    }
}

impl Default for VolleyerConfiguration {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for VolleyerConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolleyerConfiguration").finish_non_exhaustive()
    }
}

fn log_error(error: VolleyerError) {
    tracing::warn!(error = %error, "request failed");
}

#[derive(Default)]
pub struct VolleyerConfigurationBuilder {
    response_parser: Option<Arc<dyn NetworkResponseParser>>,
    error_listener: Option<ErrorListener>,
}

impl VolleyerConfigurationBuilder {
    /// Parser used when a request does not set its own.
    pub fn response_parser(mut self, parser: impl NetworkResponseParser + 'static) -> Self {
        self.response_parser = Some(Arc::new(parser));
        self
    }

    /// Error listener used when a request does not set its own. Without one,
    /// failures are logged at warn level.
    pub fn error_listener(mut self, listener: impl Fn(VolleyerError) + Send + Sync + 'static) -> Self {
        self.error_listener = Some(Arc::new(listener));
        self
    }

    pub fn build(self) -> VolleyerConfiguration {
        VolleyerConfiguration {
            response_parser: self.response_parser.unwrap_or_else(default_parser),
            error_listener: self.error_listener.unwrap_or_else(|| Arc::new(log_error) as ErrorListener),
        }
    }
}

/// A request queue plus the configuration requests made through it use.
pub struct VolleyerContext {
    queue: Arc<RequestQueue>,
    configuration: VolleyerConfiguration,
}

impl VolleyerContext {
    pub fn new(queue: Arc<RequestQueue>) -> Self {
        Self::with_configuration(queue, VolleyerConfiguration::default())
    }

    pub fn with_configuration(queue: Arc<RequestQueue>, configuration: VolleyerConfiguration) -> Self {
        Self {
            queue,
            configuration,
        }
    }

    pub fn queue(&self) -> &Arc<RequestQueue> {
        &self.queue
    }

    pub fn configuration(&self) -> &VolleyerConfiguration {
        &self.configuration
    }
}
