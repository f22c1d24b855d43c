//! Repository layout and parser settings, read from `guidedoc.toml`.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Config file looked up in the repository root.
pub const CONFIG_FILE: &str = "guidedoc.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory below the root that holds documented sources.
    pub source_dir: String,
    /// File extensions (without the leading dot) of documented sources.
    pub extensions: Vec<String>,
    pub changelog: String,
    /// File declaring the library version, relative to the root.
    pub version_file: String,
    pub repository_url: String,
    /// Classes listed first in the guide's navigation, in this order.
    pub promoted_klasses: Vec<String>,
    /// Fail on unrecognized blocks and on functions without a class.
    pub strict: bool,
    /// Forget the active class when a new source file starts.
    pub reset_active_class_per_file: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_dir: "lib".to_string(),
            extensions: vec!["coffee".to_string(), "coffee.erb".to_string()],
            changelog: "CHANGELOG.md".to_string(),
            version_file: "lib/unpoly/rails/version.rb".to_string(),
            repository_url: "https://github.com/unpoly/unpoly".to_string(),
            promoted_klasses: Vec::new(),
            strict: false,
            reset_active_class_per_file: false,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&text, path)
    }

    /// `<root>/guidedoc.toml` if it exists, defaults otherwise.
    pub fn discover(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if path.is_file() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }
}
