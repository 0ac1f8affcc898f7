//! Media types used to route a response to the parser that understands it.
//!
//! Matching looks only at `type/subtype`, case-insensitively. Parameters such
//! as `charset` are ignored here; charset handling lives in the parsers.

use std::borrow::Cow;
use std::fmt;

/// A `type/subtype` media type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentType {
    top: Cow<'static, str>,
    sub: Cow<'static, str>,
}

impl ContentType {
    pub const APPLICATION_JSON: ContentType = ContentType::from_static("application", "json");
    pub const APPLICATION_XML: ContentType = ContentType::from_static("application", "xml");
    pub const TEXT_XML: ContentType = ContentType::from_static("text", "xml");
    pub const TEXT_PLAIN: ContentType = ContentType::from_static("text", "plain");
    pub const TEXT_HTML: ContentType = ContentType::from_static("text", "html");

    /// Build from lowercase static parts.
    pub const fn from_static(top: &'static str, sub: &'static str) -> Self {
        Self {
            top: Cow::Borrowed(top),
            sub: Cow::Borrowed(sub),
        }
    }

    /// Parse a `Content-Type` header value. Returns `None` for values that
    /// are not a media type.
    pub fn parse(value: &str) -> Option<Self> {
        let parsed: mime::Mime = value.trim().parse().ok()?;
        Some(Self {
            top: Cow::Owned(parsed.type_().as_str().to_ascii_lowercase()),
            sub: Cow::Owned(parsed.subtype().as_str().to_ascii_lowercase()),
        })
    }

    /// Whether `self` matches `other`. A `*` subtype on either side matches
    /// any subtype of the same top-level type.
    pub fn matches(&self, other: &ContentType) -> bool {
        self.top.eq_ignore_ascii_case(&other.top)
            && (self.sub == "*" || other.sub == "*" || self.sub.eq_ignore_ascii_case(&other.sub))
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.top, self.sub)
    }
}

/// The set of media types a parser accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTypes {
    types: Vec<ContentType>,
}

impl ContentTypes {
    pub fn new(types: impl IntoIterator<Item = ContentType>) -> Self {
        let mut set = Self::default();
        for content_type in types {
            set.add(content_type);
        }
        set
    }

    /// Add a media type; duplicates are ignored.
    pub fn add(&mut self, content_type: ContentType) {
        if !self.types.contains(&content_type) {
            self.types.push(content_type);
        }
    }

    pub fn contains(&self, content_type: &ContentType) -> bool {
        self.types.iter().any(|candidate| candidate.matches(content_type))
    }

    /// Whether a raw `Content-Type` header value is accepted.
    pub fn accepts(&self, header_value: &str) -> bool {
        ContentType::parse(header_value).is_some_and(|content_type| self.contains(&content_type))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentType> {
        self.types.iter()
    }
}
