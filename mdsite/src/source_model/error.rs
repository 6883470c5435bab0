//! Error types for inline parsing and title extraction

use thiserror::Error;

/// Errors that can occur while splitting inline text into spans
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InlineError {
    /// An opening delimiter has no matching closing delimiter
    #[error("invalid markdown: unclosed delimiter '{delimiter}' in \"{text}\"")]
    UnclosedDelimiter {
        /// The delimiter that was left open (`**`, `*` or `` ` ``)
        delimiter: String,
        /// The text being split when the error was found
        text: String,
    },
}

/// Errors that can occur while extracting a page title
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TitleError {
    /// The document contains no level 1 heading
    #[error("Markdown must contain a level 1 heading (\"# Title\")")]
    NoTitleFound,
}
