//! XML responses via quick-xml's serde deserializer.

use crate::content_type::{ContentType, ContentTypes};
use crate::error::VolleyerError;
use crate::http::HttpResponse;
use crate::parser::{decode_body, NetworkResponseParser};
use crate::target::{ParsedValue, TargetType};

/// Parses `application/xml` and `text/xml` bodies into the target type.
///
/// Element and attribute mapping follows quick-xml's serde conventions:
/// attributes are fields renamed with a leading `@`, element text is `$text`.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlNetworkResponseParser;

impl XmlNetworkResponseParser {
    pub fn new() -> Self {
        Self
    }
}

impl NetworkResponseParser for XmlNetworkResponseParser {
    fn parse(
        &self,
        response: &HttpResponse,
        target: &TargetType,
    ) -> Result<ParsedValue, VolleyerError> {
        let document = decode_body(response)?;
        target
            .decode_xml(&document)
            .map_err(|e| VolleyerError::Parse(format!("invalid XML for {}: {e}", target.type_name())))
    }

    fn content_types(&self) -> ContentTypes {
        ContentTypes::new([ContentType::APPLICATION_XML, ContentType::TEXT_XML])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct News {
        #[serde(rename = "@id")]
        id: u32,
        title: String,
        #[serde(default)]
        tags: Vec<String>,
    }

    fn xml_response(charset: &str, body: &[u8]) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: vec![(
                "Content-Type".to_string(),
                format!("application/xml; charset={charset}"),
            )],
            body: body.to_vec(),
        }
    }

    fn parse_news(response: &HttpResponse) -> Result<News, VolleyerError> {
        XmlNetworkResponseParser::new()
            .parse(response, &TargetType::of::<News>())
            .map(|value| *value.downcast::<News>().unwrap())
    }

    #[test]
    fn parses_elements_and_attributes() {
        let resp = xml_response(
            "UTF-8",
            br#"<news id="7"><title>Hello</title><tags>a</tags><tags>b</tags></news>"#,
        );
        let news = parse_news(&resp).unwrap();
        assert_eq!(
            news,
            News {
                id: 7,
                title: "Hello".into(),
                tags: vec!["a".into(), "b".into()],
            }
        );
    }

    #[test]
    fn honours_latin1_charset() {
        let resp = xml_response("ISO-8859-1", b"<news id=\"1\"><title>Caf\xe9</title></news>");
        assert_eq!(parse_news(&resp).unwrap().title, "Café");
    }

    #[test]
    fn malformed_document_is_parse_error() {
        let resp = xml_response("UTF-8", b"<news id=\"1\"><title>Hello</news>");
        assert!(matches!(parse_news(&resp), Err(VolleyerError::Parse(_))));
    }

    #[test]
    fn missing_element_is_parse_error() {
        let resp = xml_response("UTF-8", b"<news id=\"1\"></news>");
        let err = parse_news(&resp).unwrap_err();
        assert!(matches!(err, VolleyerError::Parse(msg) if msg.contains("News")));
    }

    #[test]
    fn unsupported_charset_is_parse_error() {
        let resp = xml_response("x-unknown", b"<news id=\"1\"><title>a</title></news>");
        assert!(matches!(parse_news(&resp), Err(VolleyerError::Parse(_))));
    }

    #[test]
    fn accepts_both_xml_media_types() {
        let types = XmlNetworkResponseParser::new().content_types();
        assert!(types.accepts("text/xml"));
        assert!(types.accepts("application/xml; charset=UTF-8"));
        assert!(!types.accepts("application/json"));
    }
}
