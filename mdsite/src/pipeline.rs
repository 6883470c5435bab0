//! Site build pipeline
//!
//! This module orchestrates the stages of a site build:
//! 1. **Static assets**: Replace the output directory with a copy of the static directory
//! 2. **Discovery**: Find every markdown page below the content directory
//! 3. **Rendering**: Convert each page to HTML, extract its title and fill the template

use crate::html_exporter::{markdown_to_html, ConvertError};
use crate::site_config::SiteConfig;
use crate::source_model::{extract_title, TitleError};
use crate::templates::{load_template, render_template};
use crate::walker::{copy_static, WalkerError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Summary of a completed site build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of static files copied
    pub static_files: usize,
    /// Number of pages generated
    pub pages: usize,
}

/// Render a markdown document into a full HTML page
///
/// # Parameters
/// * `markdown` - Page source
/// * `template` - Template text with `{{ Title }}` and `{{ Content }}` placeholders
///
/// # Returns
/// * `Ok(String)` - Complete page
/// * `Err(PageError)` - The page has no title or its markdown is malformed
pub fn render_page(markdown: &str, template: &str) -> Result<String, PageError> {
    let title = extract_title(markdown).map_err(|e| PageError::TitleError(None, e))?;
    let content = markdown_to_html(markdown).map_err(|e| PageError::ConvertError(None, e))?;
    Ok(render_template(template, &title, &content))
}

/// Generate one HTML page from a markdown file
///
/// # Parameters
/// * `from` - Markdown source file
/// * `template_path` - HTML template (the built-in template is used if missing)
/// * `dest` - Output file; parent directories are created as needed
pub fn generate_page(from: &Path, template_path: &Path, dest: &Path) -> Result<(), PageError> {
    let template =
        load_template(template_path).map_err(|e| PageError::IoError(template_path.to_path_buf(), e))?;
    write_page(from, &template, dest)
}

/// Generate a page for every markdown file below `content_dir`
///
/// `content/blog/post.md` is written to `dest_dir/blog/post.html`.
///
/// # Returns
/// * `Ok(usize)` - Number of pages written
/// * `Err(PageError)` - Error of the first failing page, in path order
pub fn generate_pages_recursive(
    content_dir: &Path,
    template_path: &Path,
    dest_dir: &Path,
) -> Result<usize, PageError> {
    let template =
        load_template(template_path).map_err(|e| PageError::IoError(template_path.to_path_buf(), e))?;

    let pages = discover_pages(content_dir, dest_dir)?;
    log::info!(
        "Found {} markdown pages in {}",
        pages.len(),
        content_dir.display()
    );

    #[cfg(feature = "parallel")]
    let results: Vec<Result<(), PageError>> = pages
        .par_iter()
        .map(|(from, dest)| write_page(from, &template, dest))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<(), PageError>> = pages
        .iter()
        .map(|(from, dest)| write_page(from, &template, dest))
        .collect();

    // First failure in path order, whatever order the pages finished in
    let written = results.into_iter().collect::<Result<Vec<()>, _>>()?;
    Ok(written.len())
}

/// Build a whole site: copy static assets, then generate every page
///
/// # Parameters
/// * `config` - Site configuration with paths already resolved against the site root
pub fn build_site(config: &SiteConfig) -> Result<BuildReport, PageError> {
    check_output_dir(config)?;

    let static_files = copy_static(&config.static_dir, &config.output_dir)?;
    let pages = generate_pages_recursive(&config.content_dir, &config.template, &config.output_dir)?;

    Ok(BuildReport {
        static_files,
        pages,
    })
}

/// Refuse to build into a directory that holds the site's own sources
///
/// The output directory is deleted before every build, so it must not be,
/// or contain, the content directory, the static directory or the template.
fn check_output_dir(config: &SiteConfig) -> Result<(), PageError> {
    let output = normalize(&config.output_dir);

    for source in [&config.content_dir, &config.static_dir, &config.template] {
        if normalize(source).starts_with(&output) {
            return Err(PageError::UnsafeOutputDir {
                output: config.output_dir.clone(),
                input: source.clone(),
            });
        }
    }

    Ok(())
}

/// Canonical form of a path when it exists, the lexical path otherwise
fn normalize(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.components().collect())
}

/// List `(source, destination)` pairs for every `.md` file, sorted by path
fn discover_pages(content_dir: &Path, dest_dir: &Path) -> Result<Vec<(PathBuf, PathBuf)>, PageError> {
    if !content_dir.is_dir() {
        return Err(PageError::MissingContentDir(content_dir.to_path_buf()));
    }

    let mut pages = Vec::new();
    for entry in WalkDir::new(content_dir).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(content_dir).to_path_buf();
            PageError::IoError(path, std::io::Error::other(e))
        })?;
        let path = entry.path();

        if !entry.file_type().is_file() || path.extension().and_then(|s| s.to_str()) != Some("md") {
            continue;
        }

        let relative = path.strip_prefix(content_dir).unwrap_or(path);
        let dest = dest_dir.join(relative).with_extension("html");
        pages.push((path.to_path_buf(), dest));
    }

    Ok(pages)
}

fn write_page(from: &Path, template: &str, dest: &Path) -> Result<(), PageError> {
    log::info!("Generating page from {} to {}", from.display(), dest.display());

    let markdown =
        fs::read_to_string(from).map_err(|e| PageError::IoError(from.to_path_buf(), e))?;
    let page = render_page(&markdown, template).map_err(|e| e.with_path(from))?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| PageError::IoError(parent.to_path_buf(), e))?;
    }
    fs::write(dest, page).map_err(|e| PageError::IoError(dest.to_path_buf(), e))?;

    Ok(())
}

/// Page generation errors
#[derive(Error, Debug)]
pub enum PageError {
    #[error("IO error for {path}: {source}", path = .0.display(), source = .1)]
    IoError(PathBuf, #[source] std::io::Error),

    #[error("Content directory does not exist: {path}", path = .0.display())]
    MissingContentDir(PathBuf),

    #[error("{}{source}", describe_path(.0), source = .1)]
    TitleError(Option<PathBuf>, #[source] TitleError),

    #[error("{}{source}", describe_path(.0), source = .1)]
    ConvertError(Option<PathBuf>, #[source] ConvertError),

    #[error("Failed to copy static files: {0}")]
    StaticError(#[from] WalkerError),

    #[error(
        "Refusing to build into {output}: it contains site source {input}",
        output = .output.display(),
        input = .input.display()
    )]
    UnsafeOutputDir { output: PathBuf, input: PathBuf },
}

impl PageError {
    /// Attach the source file to title and conversion errors that lack one
    fn with_path(self, path: &Path) -> Self {
        match self {
            PageError::TitleError(None, e) => PageError::TitleError(Some(path.to_path_buf()), e),
            PageError::ConvertError(None, e) => {
                PageError::ConvertError(Some(path.to_path_buf()), e)
            }
            other => other,
        }
    }
}

fn describe_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!("Error in {}: ", path.display()),
        None => String::new(),
    }
}
