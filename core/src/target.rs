//! Runtime descriptor of the type a response should be decoded into.
//!
//! # Design
//! Parsers are stored as trait objects, so they cannot be generic over the
//! caller's type. `TargetType` closes that gap: `TargetType::of::<T>()`
//! captures monomorphized decode functions for `T` and hands them to the
//! parser, which returns the decoded value boxed as `Any`. The response
//! builder downcasts it back to `T`.

use std::any::{Any, TypeId};
use std::fmt;

use serde::de::{DeserializeOwned, IntoDeserializer};

/// A decoded value on its way back to the response builder.
pub type ParsedValue = Box<dyn Any + Send>;

type DecodeStr = fn(&str) -> Result<ParsedValue, String>;
type DecodeText = fn(String) -> Result<ParsedValue, String>;

/// Type descriptor carrying decode functions for one concrete type.
#[derive(Clone, Copy)]
pub struct TargetType {
    type_id: TypeId,
    type_name: &'static str,
    from_json: DecodeStr,
    from_xml: DecodeStr,
    from_text: DecodeText,
}

impl TargetType {
    pub fn of<T>() -> Self
    where
        T: DeserializeOwned + Send + 'static,
    {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            from_json: json_str::<T>,
            from_xml: xml_str::<T>,
            from_text: text::<T>,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Decode JSON text into the target type.
    pub fn decode_json(&self, json: &str) -> Result<ParsedValue, String> {
        (self.from_json)(json)
    }

    /// Decode an XML document into the target type.
    pub fn decode_xml(&self, xml: &str) -> Result<ParsedValue, String> {
        (self.from_xml)(xml)
    }

    /// Hand plain text to the target type as a single string value.
    pub fn decode_text(&self, text: String) -> Result<ParsedValue, String> {
        (self.from_text)(text)
    }
}

impl PartialEq for TargetType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TargetType {}

impl fmt::Debug for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TargetType").field(&self.type_name).finish()
    }
}

fn json_str<T: DeserializeOwned + Send + 'static>(json: &str) -> Result<ParsedValue, String> {
    serde_json::from_str::<T>(json)
        .map(|value| Box::new(value) as ParsedValue)
        .map_err(|e| e.to_string())
}

fn xml_str<T: DeserializeOwned + Send + 'static>(xml: &str) -> Result<ParsedValue, String> {
    quick_xml::de::from_str::<T>(xml)
        .map(|value| Box::new(value) as ParsedValue)
        .map_err(|e| e.to_string())
}

fn text<T: DeserializeOwned + Send + 'static>(text: String) -> Result<ParsedValue, String> {
    let deserializer: serde::de::value::StringDeserializer<serde::de::value::Error> =
        text.into_deserializer();
    T::deserialize(deserializer)
        .map(|value| Box::new(value) as ParsedValue)
        .map_err(|e| e.to_string())
}
