//! mdsite - Markdown static site generator
//!
//! A CLI tool that turns a directory of Markdown pages and static assets
//! into a static HTML site.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use mdsite::pipeline;
use mdsite::site_config::SiteConfig;
use std::path::{Path, PathBuf};

/// Main entry point for the mdsite CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            root,
            output,
            template,
            content,
            static_dir,
            verbose,
        } => {
            init_logging(verbose);
            let overrides = BuildOverrides {
                static_dir,
                content_dir: content,
                template,
                output_dir: output,
            };
            handle_build_command(&root, overrides)?;
        }

        Commands::Init { root } => {
            handle_init_command(&root)?;
        }

        Commands::Convert {
            input,
            output,
            verbose,
        } => {
            init_logging(verbose);
            handle_convert_command(&input, output)?;
        }

        Commands::Title { input } => {
            handle_title_command(&input)?;
        }
    }

    Ok(())
}

/// Initialize logging if verbose
fn init_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

/// Paths given on the command line that take precedence over site.toml
struct BuildOverrides {
    static_dir: Option<PathBuf>,
    content_dir: Option<PathBuf>,
    template: Option<PathBuf>,
    output_dir: Option<PathBuf>,
}

/// Handle the build command
fn handle_build_command(root: &Path, overrides: BuildOverrides) -> Result<()> {
    let mut config = SiteConfig::load_or_default(root)
        .with_context(|| format!("Failed to load site configuration from {}", root.display()))?;

    if let Some(dir) = overrides.static_dir {
        config.static_dir = dir;
    }
    if let Some(dir) = overrides.content_dir {
        config.content_dir = dir;
    }
    if let Some(path) = overrides.template {
        config.template = path;
    }
    if let Some(dir) = overrides.output_dir {
        config.output_dir = dir;
    }

    let config = config.resolve(root);

    println!("Building site...");
    println!("Content: {}", config.content_dir.display());
    println!("Output: {}", config.output_dir.display());

    let report = pipeline::build_site(&config)
        .with_context(|| format!("Failed to build site in {}", root.display()))?;

    println!("✓ Copied {} static files", report.static_files);
    println!("✓ Generated {} pages", report.pages);
    println!("\n✓ Build completed successfully!");

    Ok(())
}

/// Handle the init command
fn handle_init_command(root: &Path) -> Result<()> {
    let path = SiteConfig::init(root)
        .with_context(|| format!("Failed to initialize site in {}", root.display()))?;

    println!("✓ Created {}", path.display());
    Ok(())
}

/// Handle the convert command
fn handle_convert_command(input: &Path, output: Option<PathBuf>) -> Result<()> {
    let markdown = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let html = mdsite::markdown_to_html(&markdown)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    match output {
        Some(path) => {
            std::fs::write(&path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Successfully wrote: {}", path.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}

/// Handle the title command
fn handle_title_command(input: &Path) -> Result<()> {
    let markdown = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let title = mdsite::extract_title(&markdown)
        .with_context(|| format!("No title found in {}", input.display()))?;

    println!("{}", title);
    Ok(())
}
