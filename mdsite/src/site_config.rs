//! Site configuration from site.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the site root
pub const CONFIG_FILE_NAME: &str = "site.toml";

/// Site layout configuration from site.toml
///
/// Every path is relative to the site root unless it is absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory whose contents are copied verbatim into the output
    pub static_dir: PathBuf,

    /// Directory holding the markdown pages
    pub content_dir: PathBuf,

    /// HTML template with `{{ Title }}` and `{{ Content }}` placeholders
    pub template: PathBuf,

    /// Directory the site is generated into (deleted on every build)
    pub output_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
            content_dir: PathBuf::from("content"),
            template: PathBuf::from("template.html"),
            output_dir: PathBuf::from("public"),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a site.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the site.toml configuration file
    ///
    /// # Returns
    /// * `Ok(SiteConfig)` - Successfully loaded configuration
    /// * `Err(SiteConfigError)` - Error reading or parsing the configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SiteConfigError> {
        let content = fs::read_to_string(&path).map_err(SiteConfigError::IoError)?;

        let config: SiteConfig =
            toml::from_str(&content).map_err(SiteConfigError::ParseError)?;

        Ok(config)
    }

    /// Load `site.toml` from a site root, falling back to defaults when absent
    pub fn load_or_default<P: AsRef<Path>>(root: P) -> Result<Self, SiteConfigError> {
        let path = root.as_ref().join(CONFIG_FILE_NAME);
        if path.is_file() {
            log::info!("Loading site configuration from {}", path.display());
            Self::load(&path)
        } else {
            log::info!(
                "No {} found in {}, using defaults",
                CONFIG_FILE_NAME,
                root.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// Save configuration to a site.toml file
    ///
    /// # Parameters
    /// * `path` - Path where the site.toml file will be written
    ///
    /// # Returns
    /// * `Ok(())` - Successfully saved configuration
    /// * `Err(SiteConfigError)` - Error serializing or writing the configuration file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SiteConfigError> {
        let content = toml::to_string_pretty(self).map_err(SiteConfigError::SerializeError)?;

        fs::write(&path, content).map_err(SiteConfigError::IoError)?;

        Ok(())
    }

    /// Write a default site.toml into `root`
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - Path of the written file
    /// * `Err(SiteConfigError)` - The file already exists or could not be written
    pub fn init<P: AsRef<Path>>(root: P) -> Result<PathBuf, SiteConfigError> {
        let path = root.as_ref().join(CONFIG_FILE_NAME);
        if path.exists() {
            return Err(SiteConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            )));
        }

        log::info!("Writing default configuration to {}", path.display());
        Self::default().save(&path)?;
        Ok(path)
    }

    /// Return a copy with every relative path joined onto `root`
    pub fn resolve(&self, root: &Path) -> Self {
        Self {
            static_dir: root.join(&self.static_dir),
            content_dir: root.join(&self.content_dir),
            template: root.join(&self.template),
            output_dir: root.join(&self.output_dir),
        }
    }
}

/// Errors that can occur when loading or saving site configuration
#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
pub enum SiteConfigError {
    /// IO error when reading or writing file
    IoError(std::io::Error),

    /// Error parsing TOML
    ParseError(toml::de::Error),

    /// Error serializing to TOML
    SerializeError(toml::ser::Error),
}

impl std::fmt::Display for SiteConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteConfigError::IoError(e) => write!(f, "IO error: {}", e),
            SiteConfigError::ParseError(e) => write!(f, "TOML parse error: {}", e),
            SiteConfigError::SerializeError(e) => write!(f, "TOML serialize error: {}", e),
        }
    }
}

impl std::error::Error for SiteConfigError {}
