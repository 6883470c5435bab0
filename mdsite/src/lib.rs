//! mdsite - Markdown static site generator
//!
//! Converts a deliberately small subset of Markdown into an HTML node tree
//! and renders it into page templates.
//!
//! The conversion pipeline runs in four steps:
//! 1. **Segmentation**: split the document into blank-line separated blocks
//! 2. **Classification**: assign every block a [`BlockType`]
//! 3. **Building**: turn each block into a [`Node`] subtree, splitting inline
//!    text into [`TextSpan`]s
//! 4. **Serialization**: render the tree with [`Node::to_html`]

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod html_exporter;
pub mod html_node;
pub mod pipeline;
pub mod site_config;
pub mod source_model;
pub mod templates;
pub mod walker;

pub use html_exporter::{markdown_to_html, markdown_to_node, ConvertError};
pub use html_node::{Attributes, LeafNode, Node, NodeError, ParentNode};
pub use site_config::SiteConfig;
pub use source_model::{
    classify, extract_title, markdown_to_blocks, text_to_spans, BlockType, InlineError, SpanKind,
    TextSpan, TitleError,
};
