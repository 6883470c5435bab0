//! HTML exporter for markdown documents
//!
//! This module builds the HTML node tree for a markdown document:
//! - Each blank-line separated block becomes one element (`p`, `h1`-`h6`,
//!   `blockquote`, `ul`, `ol`, `pre`)
//! - Inline text inside a block is split into spans and converted to leaves
//! - All blocks are wrapped in a single top-level `div`

use crate::html_node::{Attributes, LeafNode, Node, NodeError};
use crate::source_model::{
    classify, markdown_to_blocks, text_to_spans, BlockType, InlineError, SpanKind, TextSpan,
};
use thiserror::Error;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Errors that can occur while converting markdown to HTML
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Inline parse error: {0}")]
    Inline(#[from] InlineError),

    #[error("HTML serialization error: {0}")]
    Node(#[from] NodeError),
}

/// Convert a markdown document to an HTML string
///
/// # Parameters
/// * `markdown` - Whole markdown document
///
/// # Returns
/// * `Ok(String)` - Serialized `<div>...</div>` fragment
/// * `Err(ConvertError)` - Malformed inline markup, or a tree that cannot be
///   serialized (an empty document yields a `div` without children)
pub fn markdown_to_html(markdown: &str) -> Result<String, ConvertError> {
    let tree = markdown_to_node(markdown)?;
    Ok(tree.to_html()?)
}

/// Build the node tree for a markdown document
///
/// Blocks are built independently (in parallel with the `parallel` feature)
/// and reassembled in document order. If several blocks are malformed, the
/// error of the first one in the document is returned.
pub fn markdown_to_node(markdown: &str) -> Result<Node, InlineError> {
    let blocks = markdown_to_blocks(markdown);
    log::debug!("Segmented document into {} blocks", blocks.len());

    #[cfg(feature = "parallel")]
    let results: Vec<Result<Node, InlineError>> =
        blocks.par_iter().map(|block| block_to_node(block)).collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<Node, InlineError>> =
        blocks.iter().map(|block| block_to_node(block)).collect();

    let children = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    Ok(Node::parent("div", children))
}

/// Classify a single block and build its element
pub fn block_to_node(block: &str) -> Result<Node, InlineError> {
    let block_type = classify(block);
    log::trace!("Building {} block ({} bytes)", block_type, block.len());

    match block_type {
        BlockType::Paragraph => paragraph_to_node(block),
        BlockType::Heading => heading_to_node(block),
        BlockType::Quote => quote_to_node(block),
        BlockType::UnorderedList => list_to_node(block, "ul"),
        BlockType::OrderedList => list_to_node(block, "ol"),
        BlockType::Code => Ok(code_to_node(block)),
    }
}

/// Convert one span to its leaf element
///
/// Normal text becomes a raw text leaf; images become void `img` elements
/// whose alt text is taken from the span content.
pub fn span_to_node(span: &TextSpan) -> Node {
    let target = span.target.clone().unwrap_or_default();

    let leaf = match span.kind {
        SpanKind::Normal => LeafNode::text(span.content.as_str()),
        SpanKind::Bold => LeafNode::element("b", span.content.as_str()),
        SpanKind::Italic => LeafNode::element("i", span.content.as_str()),
        SpanKind::Code => LeafNode::element("code", span.content.as_str()),
        SpanKind::Link => LeafNode::element("a", span.content.as_str())
            .with_attributes(Attributes::new().with("href", target)),
        SpanKind::Image => LeafNode::void("img").with_attributes(
            Attributes::new()
                .with("src", target)
                .with("alt", span.content.as_str()),
        ),
    };

    Node::Leaf(leaf)
}

/// Split inline text into spans and convert each to a node
fn text_to_children(text: &str) -> Result<Vec<Node>, InlineError> {
    Ok(text_to_spans(text)?.iter().map(span_to_node).collect())
}

fn paragraph_to_node(block: &str) -> Result<Node, InlineError> {
    Ok(Node::parent("p", text_to_children(block)?))
}

fn heading_to_node(block: &str) -> Result<Node, InlineError> {
    let level = block.chars().take_while(|&c| c == '#').count();
    let text = block[level..].trim_start();
    Ok(Node::parent(format!("h{level}"), text_to_children(text)?))
}

fn quote_to_node(block: &str) -> Result<Node, InlineError> {
    let text = block
        .lines()
        .map(|line| line.trim_start_matches('>').trim_start())
        .collect::<Vec<_>>()
        .join("\n");

    let paragraph = Node::parent("p", text_to_children(&text)?);
    Ok(Node::parent("blockquote", vec![paragraph]))
}

/// Build a `ul` or `ol`; each line loses its marker and the space after it
fn list_to_node(block: &str, tag: &str) -> Result<Node, InlineError> {
    let items = block
        .lines()
        .map(|line| {
            let text = line.split_once(' ').map_or("", |(_marker, rest)| rest);
            Ok(Node::parent("li", text_to_children(text)?))
        })
        .collect::<Result<Vec<_>, InlineError>>()?;

    Ok(Node::parent(tag, items))
}

/// Build `<pre><code>` from the lines between the fences, without inline parsing
fn code_to_node(block: &str) -> Node {
    let lines: Vec<&str> = block.lines().collect();
    let interior = match lines.as_slice() {
        [_open, body @ .., _close] => body.join("\n"),
        _ => String::new(),
    };

    Node::parent("pre", vec![Node::parent("code", vec![Node::text(interior)])])
}
