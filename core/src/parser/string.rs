//! Plain-text responses.

use crate::content_type::{ContentType, ContentTypes};
use crate::error::VolleyerError;
use crate::http::HttpResponse;
use crate::parser::{decode_body, NetworkResponseParser};
use crate::target::{ParsedValue, TargetType};

/// Hands the decoded body to the target as a single string. Works for
/// `String` and for any type that deserializes from a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringNetworkResponseParser;

impl StringNetworkResponseParser {
    pub fn new() -> Self {
        Self
    }
}

impl NetworkResponseParser for StringNetworkResponseParser {
    fn parse(
        &self,
        response: &HttpResponse,
        target: &TargetType,
    ) -> Result<ParsedValue, VolleyerError> {
        let text = decode_body(response)?.into_owned();
        target.decode_text(text).map_err(|e| {
            VolleyerError::Parse(format!("text body cannot become {}: {e}", target.type_name()))
        })
    }

    fn content_types(&self) -> ContentTypes {
        ContentTypes::new([ContentType::TEXT_PLAIN, ContentType::TEXT_HTML])
    }
}
