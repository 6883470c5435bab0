//! Source model for the parsing stage
//!
//! This module turns raw markdown text into the intermediate structures the
//! HTML builder consumes: blank-line separated blocks, their classification,
//! and typed inline text spans.

// Submodules
mod blocks;
mod error;
mod inline;
mod text_span;
mod title;

// Re-export public types
pub use blocks::{classify, markdown_to_blocks, BlockType};
pub use error::{InlineError, TitleError};
pub use inline::{
    extract_markdown_images, extract_markdown_links, split_spans_delimiter, split_spans_image,
    split_spans_link, text_to_spans,
};
pub use text_span::{SpanKind, TextSpan};
pub use title::extract_title;
