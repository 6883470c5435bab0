//! Page title extraction

use super::error::TitleError;

/// Extract the page title from the first level 1 heading
///
/// The first line that starts with `"# "` (after trimming) provides the
/// title. Deeper headings (`## `, `### `...) are ignored.
///
/// # Parameters
/// * `markdown` - Whole markdown document
///
/// # Returns
/// * `Ok(String)` - Heading text with surrounding whitespace removed
/// * `Err(TitleError::NoTitleFound)` - No level 1 heading exists
pub fn extract_title(markdown: &str) -> Result<String, TitleError> {
    markdown
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .ok_or(TitleError::NoTitleFound)
}
