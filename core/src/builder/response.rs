//! Second stage of the fluent API: parser, listeners and dispatch.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crossbeam_channel::bounded;
use serde::de::DeserializeOwned;

use crate::context::VolleyerContext;
use crate::error::VolleyerError;
use crate::http::{HttpRequest, HttpResponse};
use crate::parser::{parse_response, NetworkResponseParser};
use crate::target::TargetType;

type Listener<T> = Box<dyn FnOnce(T) + Send>;
type OnceErrorListener = Box<dyn FnOnce(VolleyerError) + Send>;

/// A finalized request waiting to be dispatched.
///
/// The target type is fixed when the builder is created by
/// `RequestBuilder::set_target_class`. `execute` and `send` consume the
/// builder, so a request is dispatched at most once.
pub struct ResponseBuilder<T> {
    context: Arc<VolleyerContext>,
    request: HttpRequest,
    target_class: TargetType,
    response_parser: Option<Arc<dyn NetworkResponseParser>>,
    listener: Option<Listener<T>>,
    error_listener: Option<OnceErrorListener>,
    _target: PhantomData<fn() -> T>,
}

impl<T> ResponseBuilder<T>
where
    T: DeserializeOwned + Send + 'static,
{
    pub(crate) fn new(
        context: Arc<VolleyerContext>,
        request: HttpRequest,
        target_class: TargetType,
    ) -> Self {
        Self {
            context,
            request,
            target_class,
            response_parser: None,
            listener: None,
            error_listener: None,
            _target: PhantomData,
        }
    }

    pub fn target_class(&self) -> TargetType {
        self.target_class
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    /// Parse this response with `parser` instead of the configured default.
    pub fn with_response_parser(mut self, parser: impl NetworkResponseParser + 'static) -> Self {
        self.response_parser = Some(Arc::new(parser));
        self
    }

    /// Called with the decoded value when the request succeeds.
    pub fn with_listener(mut self, listener: impl FnOnce(T) + Send + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Called with the error when the request fails. Replaces the
    /// configuration's error listener for this request.
    pub fn with_error_listener(mut self, listener: impl FnOnce(VolleyerError) + Send + 'static) -> Self {
        self.error_listener = Some(Box::new(listener));
        self
    }

    /// Dispatch the request. The outcome goes to the listeners on a
    /// dispatcher thread.
    pub fn execute(self) {
        let ResponseBuilder {
            context,
            request,
            target_class,
            response_parser,
            listener,
            error_listener,
            ..
        } = self;
        let parser = response_parser.unwrap_or_else(|| context.configuration().response_parser().clone());
        let default_error_listener = context.configuration().error_listener().clone();

        context.queue().add(
            request,
            Box::new(move |result| match deliver::<T>(result, parser.as_ref(), &target_class) {
                Ok(value) => {
                    if let Some(listener) = listener {
                        listener(value);
                    }
                }
                Err(error) => match error_listener {
                    Some(listener) => listener(error),
                    None => default_error_listener(error),
                },
            }),
        );
    }

    /// Dispatch the request and block until it completes.
    ///
    /// Listeners set on this builder are not called. Must not be called from
    /// inside a listener when the queue has a single dispatcher.
    pub fn send(self) -> Result<T, VolleyerError> {
        let parser = self
            .response_parser
            .unwrap_or_else(|| self.context.configuration().response_parser().clone());
        let target_class = self.target_class;
        let (tx, rx) = bounded(1);

        self.context.queue().add(
            self.request,
            Box::new(move |result| {
                let _ = tx.send(deliver::<T>(result, parser.as_ref(), &target_class));
            }),
        );
        rx.recv().unwrap_or_else(|_| {
            Err(VolleyerError::Network(
                "request was dropped before completing".to_string(),
            ))
        })
    }
}

impl<T> fmt::Debug for ResponseBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBuilder")
            .field("request", &self.request)
            .field("target_class", &self.target_class)
            .finish_non_exhaustive()
    }
}

/// Turn a network outcome into the caller's value.
fn deliver<T: 'static>(
    result: Result<HttpResponse, VolleyerError>,
    parser: &dyn NetworkResponseParser,
    target_class: &TargetType,
) -> Result<T, VolleyerError> {
    let response = result?;
    if !response.is_success() {
        return Err(VolleyerError::Http {
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        });
    }
    parse_response(parser, &response, target_class)?
        .downcast::<T>()
        .map(|value| *value)
        .map_err(|_| {
            VolleyerError::Parse(format!(
                "parser did not produce a {}",
                target_class.type_name()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::RequestBuilder;
    use crate::content_type::{ContentType, ContentTypes};
    use crate::http::HttpMethod;
    use crate::target::ParsedValue;
    use crate::test_support::{context_with, StubNetwork};
    use serde::Deserialize;
    use std::time::Duration;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Song {
        title: String,
        year: u16,
    }

    fn response_builder<T>(network: StubNetwork) -> ResponseBuilder<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        RequestBuilder::new(context_with(network), "http://stub/song", HttpMethod::Get)
            .unwrap()
            .set_target_class::<T>()
            .unwrap()
    }

    #[test]
    fn send_returns_typed_json() {
        let network = StubNetwork::ok("application/json", r#"{"title":"Blue","year":1998}"#);
        let song = response_builder::<Song>(network).send().unwrap();
        assert_eq!(song, Song { title: "Blue".into(), year: 1998 });
    }

    #[test]
    fn send_returns_typed_xml() {
        let network = StubNetwork::ok(
            "text/xml; charset=UTF-8",
            "<song><title>Blue</title><year>1998</year></song>",
        );
        let song = response_builder::<Song>(network).send().unwrap();
        assert_eq!(song.year, 1998);
    }

    #[test]
    fn send_passes_request_to_network() {
        let network = StubNetwork::ok("text/plain", "ok");
        let recorded = network.recorded();
        let mut builder = RequestBuilder::new(context_with(network), "http://stub/x", HttpMethod::Get).unwrap();
        builder.add_header("X-Id", "42").unwrap();
        assert_eq!(builder.after_request().unwrap().send().unwrap(), "ok");

        let requests = recorded.lock();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://stub/x");
        assert_eq!(requests[0].header("x-id"), Some("42"));
    }

    #[test]
    fn non_success_status_is_http_error() {
        let network = StubNetwork::status(404, "text/plain", "missing");
        let err = response_builder::<String>(network).send().unwrap_err();
        assert_eq!(
            err,
            VolleyerError::Http {
                status: 404,
                body: "missing".into()
            }
        );
    }

    #[test]
    fn network_failure_is_surfaced() {
        let err = response_builder::<String>(StubNetwork::failing("connection refused"))
            .send()
            .unwrap_err();
        assert_eq!(err, VolleyerError::Network("connection refused".into()));
    }

    #[test]
    fn malformed_body_is_parse_error() {
        let network = StubNetwork::ok("application/json", "{");
        let err = response_builder::<Song>(network).send().unwrap_err();
        assert!(matches!(err, VolleyerError::Parse(_)));
    }

    #[test]
    fn after_request_reads_json_and_xml_as_text() {
        for (content_type, body) in [
            ("application/json", r#"{"a":1}"#),
            ("application/xml", "<a>1</a>"),
            ("text/xml", "<a><b>x</b><c>y</c></a>"),
        ] {
            let context = context_with(StubNetwork::ok(content_type, body));
            let text = RequestBuilder::new(context, "http://stub/raw", HttpMethod::Get)
                .unwrap()
                .after_request()
                .unwrap()
                .send()
                .unwrap();
            assert_eq!(text, body, "{content_type}");
        }
    }

    struct WrongTypeParser;

    impl NetworkResponseParser for WrongTypeParser {
        fn parse(&self, _: &HttpResponse, _: &TargetType) -> Result<ParsedValue, VolleyerError> {
            Ok(Box::new(7_u8))
        }

        fn content_types(&self) -> ContentTypes {
            ContentTypes::new([ContentType::TEXT_PLAIN])
        }
    }

    #[test]
    fn parser_returning_wrong_type_is_parse_error() {
        let network = StubNetwork::ok("text/plain", "hello");
        let err = response_builder::<String>(network)
            .with_response_parser(WrongTypeParser)
            .send()
            .unwrap_err();
        assert!(matches!(err, VolleyerError::Parse(msg) if msg.contains("String")));
    }

    #[test]
    fn execute_delivers_to_listener() {
        let network = StubNetwork::ok("text/plain", "hello");
        let (tx, rx) = bounded(1);
        response_builder::<String>(network)
            .with_listener(move |value| {
                let _ = tx.send(value);
            })
            .execute();
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), "hello");
    }

    #[test]
    fn execute_delivers_errors_to_error_listener() {
        let network = StubNetwork::status(500, "text/plain", "boom");
        let (tx, rx) = bounded(1);
        response_builder::<String>(network)
            .with_listener(|_| panic!("listener must not run"))
            .with_error_listener(move |error| {
                let _ = tx.send(error);
            })
            .execute();
        let error = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(error, VolleyerError::Http { status: 500, .. }));
    }

    #[test]
    fn execute_falls_back_to_configured_error_listener() {
        let (tx, rx) = bounded(1);
        let context = crate::test_support::context_with_error_listener(
            StubNetwork::failing("down"),
            move |error| {
                let _ = tx.send(error);
            },
        );
        RequestBuilder::new(context, "http://stub", HttpMethod::Get)
            .unwrap()
            .after_request()
            .unwrap()
            .execute();
        let error = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(error, VolleyerError::Network("down".into()));
    }

    #[test]
    fn debug_shows_request_and_target() {
        let builder = response_builder::<String>(StubNetwork::ok("text/plain", ""));
        let rendered = format!("{builder:?}");
        assert!(rendered.contains("http://stub/song"));
        assert!(rendered.contains("String"));
    }
}
