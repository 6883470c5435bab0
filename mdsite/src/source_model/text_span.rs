//! Text span representation
//!
//! A text span is a run of inline text with a single kind of formatting.
//! This is the unit the inline splitter produces and the HTML builder turns
//! into leaf nodes.

use std::fmt;

/// Formatting kind of a text span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// Plain text, still eligible for further splitting
    Normal,
    Bold,
    Italic,
    /// Inline code
    Code,
    /// Hyperlink; the span target holds the URL
    Link,
    /// Image; the span content is the alt text and the target the source URL
    Image,
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpanKind::Normal => "normal",
            SpanKind::Bold => "bold",
            SpanKind::Italic => "italic",
            SpanKind::Code => "code",
            SpanKind::Link => "link",
            SpanKind::Image => "image",
        };
        f.write_str(name)
    }
}

/// A span of inline text with one formatting kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    /// The text content (link label or image alt text for targeted spans)
    pub content: String,

    pub kind: SpanKind,

    /// Link or image URL, `None` for every other kind
    pub target: Option<String>,
}

impl TextSpan {
    /// Create a span without a target
    pub fn new(content: impl Into<String>, kind: SpanKind) -> Self {
        Self {
            content: content.into(),
            kind,
            target: None,
        }
    }

    /// Create a plain text span
    pub fn normal(content: impl Into<String>) -> Self {
        Self::new(content, SpanKind::Normal)
    }

    /// Create a link span
    pub fn link(content: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: SpanKind::Link,
            target: Some(target.into()),
        }
    }

    /// Create an image span
    pub fn image(alt: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            content: alt.into(),
            kind: SpanKind::Image,
            target: Some(target.into()),
        }
    }

    /// Whether later splitting passes may still rewrite this span
    pub fn is_normal(&self) -> bool {
        self.kind == SpanKind::Normal
    }
}
