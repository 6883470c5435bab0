//! Command-line interface definitions for mdsite

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI structure for the mdsite application
#[derive(Parser)]
#[command(name = "mdsite")]
#[command(version)]
#[command(about = "Markdown static site generator", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for mdsite
#[derive(Subcommand)]
pub enum Commands {
    /// Build the whole site: copy static files and render every page
    Build {
        /// Site root containing site.toml (defaults to current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        root: PathBuf,

        /// Output directory (overrides site.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// HTML template file (overrides site.toml)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Markdown content directory (overrides site.toml)
        #[arg(short, long)]
        content: Option<PathBuf>,

        /// Static asset directory (overrides site.toml)
        #[arg(long = "static", value_name = "DIR")]
        static_dir: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write a default site.toml into a site root
    Init {
        /// Site root (defaults to current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        root: PathBuf,
    },

    /// Convert a single markdown file to an HTML fragment
    Convert {
        /// Markdown file to convert
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the title (first level 1 heading) of a markdown file
    Title {
        /// Markdown file to inspect
        input: PathBuf,
    },
}
