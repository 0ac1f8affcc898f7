//! JSON responses via serde_json.

use crate::content_type::{ContentType, ContentTypes};
use crate::error::VolleyerError;
use crate::http::HttpResponse;
use crate::parser::{decode_body, NetworkResponseParser};
use crate::target::{ParsedValue, TargetType};

/// Parses `application/json` bodies into the target type.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonNetworkResponseParser;

impl JsonNetworkResponseParser {
    pub fn new() -> Self {
        Self
    }
}

impl NetworkResponseParser for JsonNetworkResponseParser {
    fn parse(
        &self,
        response: &HttpResponse,
        target: &TargetType,
    ) -> Result<ParsedValue, VolleyerError> {
        let document = decode_body(response)?;
        target
            .decode_json(&document)
            .map_err(|e| VolleyerError::Parse(format!("invalid JSON for {}: {e}", target.type_name())))
    }

    fn content_types(&self) -> ContentTypes {
        ContentTypes::new([ContentType::APPLICATION_JSON])
    }
}
