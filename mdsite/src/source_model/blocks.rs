//! Block-level segmentation and classification
//!
//! A markdown document is cut into blocks at blank lines. Each block is then
//! classified into exactly one [`BlockType`]; a block that does not satisfy
//! every rule of a type falls through to the next candidate and, finally, to
//! a paragraph.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// One to six `#` followed by a space
static HEADING_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6} ").unwrap());

/// Ordered list marker: digits followed by a dot
static ORDERED_ITEM_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\.").unwrap());

/// Opening and closing code fence
pub const CODE_FENCE: &str = "```";

/// Unordered list markers; a block must use only one of them
const UNORDERED_MARKERS: [&str; 2] = ["- ", "* "];

/// Block-level markdown element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Paragraph,
    /// Single `#`..`######` line
    Heading,
    /// Every line starts with `>`
    Quote,
    /// Every line starts with the same `- ` or `* ` marker
    UnorderedList,
    /// Lines numbered `1.` to `N.` without gaps
    OrderedList,
    /// Fenced with ```` ``` ````
    Code,
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading => "heading",
            BlockType::Quote => "quote",
            BlockType::UnorderedList => "unordered_list",
            BlockType::OrderedList => "ordered_list",
            BlockType::Code => "code",
        };
        f.write_str(name)
    }
}

/// Split a document into blank-line separated blocks
///
/// Every line is trimmed first, so whitespace-only lines count as blank and
/// indentation is not preserved. Runs of blank lines collapse into one
/// separator; leading and trailing blank lines produce no blocks.
///
/// # Parameters
/// * `markdown` - Whole markdown document
///
/// # Returns
/// * `Vec<String>` - Blocks in document order, lines joined with `\n`
pub fn markdown_to_blocks(markdown: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in markdown.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    blocks
}

/// Classify a block
///
/// Checks run in a fixed precedence: heading, unordered list, quote, code,
/// ordered list, and finally paragraph.
pub fn classify(block: &str) -> BlockType {
    let lines: Vec<&str> = block.lines().collect();

    if is_heading(&lines) {
        BlockType::Heading
    } else if is_unordered_list(&lines) {
        BlockType::UnorderedList
    } else if is_quote(&lines) {
        BlockType::Quote
    } else if is_code(&lines) {
        BlockType::Code
    } else if is_ordered_list(&lines) {
        BlockType::OrderedList
    } else {
        BlockType::Paragraph
    }
}

fn is_heading(lines: &[&str]) -> bool {
    matches!(lines, [line] if HEADING_PATTERN.is_match(line))
}

fn is_unordered_list(lines: &[&str]) -> bool {
    !lines.is_empty()
        && UNORDERED_MARKERS
            .iter()
            .any(|marker| lines.iter().all(|line| line.starts_with(marker)))
}

fn is_quote(lines: &[&str]) -> bool {
    !lines.is_empty() && lines.iter().all(|line| line.starts_with('>'))
}

fn is_code(lines: &[&str]) -> bool {
    match lines {
        [first, .., last] => first.starts_with(CODE_FENCE) && *last == CODE_FENCE,
        _ => false,
    }
}

fn is_ordered_list(lines: &[&str]) -> bool {
    if lines.is_empty() {
        return false;
    }

    lines.iter().zip(1u64..).all(|(line, expected)| {
        ORDERED_ITEM_PATTERN
            .captures(line)
            .and_then(|caps| caps.get(1))
            .and_then(|number| number.as_str().parse::<u64>().ok())
            == Some(expected)
    })
}
