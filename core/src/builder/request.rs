//! First stage of the fluent API: URL, method, headers and body.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::builder::ResponseBuilder;
use crate::context::VolleyerContext;
use crate::error::VolleyerError;
use crate::http::{HttpMethod, HttpRequest};
use crate::target::TargetType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuildState {
    Open,
    Finalized,
}

/// Accumulates a request until the caller picks the response type.
///
/// `set_target_class` (or `after_request`) finalizes the builder exactly
/// once; every mutation after that fails with `VolleyerError::IllegalState`.
pub struct RequestBuilder {
    context: Arc<VolleyerContext>,
    url: String,
    method: HttpMethod,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    state: BuildState,
}

impl RequestBuilder {
    /// Fails with `InvalidArgument` when `url` is empty or blank.
    pub fn new(
        context: Arc<VolleyerContext>,
        url: impl Into<String>,
        method: HttpMethod,
    ) -> Result<Self, VolleyerError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(VolleyerError::InvalidArgument("url must not be empty"));
        }
        Ok(Self {
            context,
            url,
            method,
            headers: Vec::new(),
            body: None,
            state: BuildState::Open,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn is_finalized(&self) -> bool {
        self.state == BuildState::Finalized
    }

    /// Set a header. A header with the same name (case-insensitive) is
    /// replaced in place.
    pub fn add_header(&mut self, key: &str, value: &str) -> Result<&mut Self, VolleyerError> {
        if http::HeaderName::from_bytes(key.as_bytes()).is_err() {
            return Err(VolleyerError::InvalidArgument("header key is not a valid header name"));
        }
        if http::HeaderValue::from_str(value).is_err() {
            return Err(VolleyerError::InvalidArgument("header value is not a valid header value"));
        }
        self.ensure_open()?;

        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.headers.push((key.to_string(), value.to_string())),
        }
        Ok(self)
    }

    /// Attach a request body. Only POST, PUT and PATCH carry one.
    pub fn with_body(&mut self, body: impl Into<Vec<u8>>) -> Result<&mut Self, VolleyerError> {
        self.ensure_open()?;
        if !self.method.allows_body() {
            return Err(VolleyerError::IllegalState("this HTTP method does not carry a body"));
        }
        self.body = Some(body.into());
        Ok(self)
    }

    /// Finalize the request and choose the type the response decodes into.
    pub fn set_target_class<T>(&mut self) -> Result<ResponseBuilder<T>, VolleyerError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.ensure_open()?;
        self.state = BuildState::Finalized;
        let request = HttpRequest {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
        };
        Ok(ResponseBuilder::new(
            Arc::clone(&self.context),
            request,
            TargetType::of::<T>(),
        ))
    }

    /// Finalize the request, reading the response as a `String`.
    pub fn after_request(&mut self) -> Result<ResponseBuilder<String>, VolleyerError> {
        self.set_target_class::<String>()
    }

    /// Finalize and send, delivering the response text to the context's
    /// default listeners.
    pub fn execute(&mut self) -> Result<(), VolleyerError> {
        self.after_request()?.execute();
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), VolleyerError> {
        match self.state {
            BuildState::Open => Ok(()),
            BuildState::Finalized => Err(VolleyerError::IllegalState(
                "request builder is already finalized",
            )),
        }
    }
}
