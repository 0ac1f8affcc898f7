//! Routes a response to one of several parsers by its `Content-Type`.

use std::sync::Arc;

use crate::content_type::ContentTypes;
use crate::error::VolleyerError;
use crate::http::HttpResponse;
use crate::parser::{NetworkResponseParser, StringNetworkResponseParser};
use crate::target::{ParsedValue, TargetType};

/// Delegates to the first registered parser that accepts the response's
/// content type. Responses nobody claims go to the fallback parser, or fail
/// with `VolleyerError::Parse` when there is none.
///
/// A `String` target skips routing: the decoded body is returned as is,
/// markup included.
#[derive(Clone, Default)]
pub struct IntegratedNetworkResponseParser {
    parsers: Vec<Arc<dyn NetworkResponseParser>>,
    fallback: Option<Arc<dyn NetworkResponseParser>>,
}

impl IntegratedNetworkResponseParser {
    pub fn builder() -> IntegratedNetworkResponseParserBuilder {
        IntegratedNetworkResponseParserBuilder::default()
    }

    fn select(&self, content_type: Option<&str>) -> Option<&Arc<dyn NetworkResponseParser>> {
        content_type
            .and_then(|ct| self.parsers.iter().find(|p| p.content_types().accepts(ct)))
            .or(self.fallback.as_ref())
    }
}

impl NetworkResponseParser for IntegratedNetworkResponseParser {
    fn parse(
        &self,
        response: &HttpResponse,
        target: &TargetType,
    ) -> Result<ParsedValue, VolleyerError> {
        let content_type = response.content_type();
        if target.is::<String>() {
            tracing::trace!(content_type, "string target, reading body as text");
            return StringNetworkResponseParser::new().parse(response, target);
        }
        match self.select(content_type) {
            Some(parser) => {
                tracing::trace!(content_type, target = target.type_name(), "parser selected");
                parser.parse(response, target)
            }
            None => Err(VolleyerError::Parse(format!(
                "no parser registered for content type {}",
                content_type.unwrap_or("<none>")
            ))),
        }
    }

    fn content_types(&self) -> ContentTypes {
        let mut types = ContentTypes::default();
        for parser in &self.parsers {
            for content_type in parser.content_types().iter() {
                types.add(content_type.clone());
            }
        }
        types
    }
}

/// Builder for `IntegratedNetworkResponseParser`.
#[derive(Default)]
pub struct IntegratedNetworkResponseParserBuilder {
    parsers: Vec<Arc<dyn NetworkResponseParser>>,
    fallback: Option<Arc<dyn NetworkResponseParser>>,
}

impl IntegratedNetworkResponseParserBuilder {
    /// Register a parser. Earlier registrations win when content types overlap.
    pub fn add_parser(mut self, parser: impl NetworkResponseParser + 'static) -> Self {
        self.parsers.push(Arc::new(parser));
        self
    }

    pub fn fallback(mut self, parser: impl NetworkResponseParser + 'static) -> Self {
        self.fallback = Some(Arc::new(parser));
        self
    }

    pub fn build(self) -> IntegratedNetworkResponseParser {
        IntegratedNetworkResponseParser {
            parsers: self.parsers,
            fallback: self.fallback,
        }
    }
}
