//! Page templates
//!
//! A template is an HTML file containing `{{ Title }}` and `{{ Content }}`
//! placeholders. A default template is compiled into the binary for sites
//! that do not provide their own.

use std::fs;
use std::path::Path;

/// Placeholder replaced with the page title
pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";

/// Placeholder replaced with the rendered page body
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Embedded fallback template
pub const DEFAULT_TEMPLATE: &str = include_str!("templates/default.html");

/// Substitute every title and content placeholder in a template
///
/// Placeholders that do not appear in the template are simply not filled.
pub fn render_template(template: &str, title: &str, content: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content)
}

/// Read a template from disk, or use [`DEFAULT_TEMPLATE`] if the file is missing
///
/// # Returns
/// * `Ok(String)` - Template text
/// * `Err(std::io::Error)` - The file exists but could not be read
pub fn load_template(path: &Path) -> std::io::Result<String> {
    if path.is_file() {
        log::info!("Reading template from: {}", path.display());
        fs::read_to_string(path)
    } else {
        log::warn!(
            "Template {} not found, using built-in default",
            path.display()
        );
        Ok(DEFAULT_TEMPLATE.to_string())
    }
}
