//! Run the default parser against the JSON test vectors in `test-vectors/`.
//!
//! Each case describes a response (content type and body) and the value or
//! error kind the default parser must produce for it.

use serde::Deserialize;
use volleyer::parser::{default_parser, parse_response};
use volleyer::{HttpResponse, TargetType, VolleyerError};

#[derive(Debug, Deserialize, PartialEq)]
struct Book {
    #[serde(rename = "@isbn", alias = "isbn")]
    isbn: String,
    title: String,
    pages: u32,
}

fn response_from(case: &serde_json::Value) -> HttpResponse {
    let headers = case["content_type"]
        .as_str()
        .map(|ct| vec![("Content-Type".to_string(), ct.to_string())])
        .unwrap_or_default();
    let body = match case["body_bytes"].as_array() {
        Some(bytes) => bytes.iter().map(|b| b.as_u64().unwrap() as u8).collect(),
        None => case["body"].as_str().unwrap().as_bytes().to_vec(),
    };
    HttpResponse {
        status: 200,
        headers,
        body,
    }
}

#[test]
fn parser_test_vectors() {
    let raw = include_str!("../../test-vectors/parsers.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    let parser = default_parser();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = response_from(case);
        let expected = &case["expected"];

        match case["target"].as_str().unwrap() {
            "book" => {
                let result = parse_response(parser.as_ref(), &response, &TargetType::of::<Book>())
                    .map(|value| *value.downcast::<Book>().unwrap());
                match expected.get("ok") {
                    Some(ok) => {
                        let want: Book = serde_json::from_value(ok.clone()).unwrap();
                        assert_eq!(result.unwrap(), want, "{name}");
                    }
                    None => assert!(matches!(result, Err(VolleyerError::Parse(_))), "{name}: {result:?}"),
                }
            }
            "string" => {
                let result = parse_response(parser.as_ref(), &response, &TargetType::of::<String>())
                    .map(|value| *value.downcast::<String>().unwrap());
                match expected.get("ok") {
                    Some(ok) => assert_eq!(result.unwrap(), ok.as_str().unwrap(), "{name}"),
                    None => assert!(matches!(result, Err(VolleyerError::Parse(_))), "{name}: {result:?}"),
                }
            }
            other => panic!("unknown target: {other}"),
        }
    }
}
