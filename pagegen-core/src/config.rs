use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::links::BasePath;

/// Everything a build needs, as read from `pagegen.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BuildConfig {
    /// Directory containing markdown files
    pub content: PathBuf,
    /// HTML template with `{{ Title }}` and `{{ Content }}` slots
    pub template: PathBuf,
    /// Output directory for the generated site
    pub output: PathBuf,
    /// Assets copied into the output as-is. Skipped when absent or missing.
    #[serde(rename = "static")]
    pub static_dir: Option<PathBuf>,
    /// URL prefix the site is deployed under
    pub base_path: BasePath,
    /// Empty the output directory before building
    pub clean: bool,
    /// Generate pages on a thread pool
    pub parallel: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content: PathBuf::from("./content"),
            template: PathBuf::from("./template.html"),
            output: PathBuf::from("./public"),
            static_dir: Some(PathBuf::from("./static")),
            base_path: BasePath::default(),
            clean: false,
            parallel: false,
        }
    }
}

impl BuildConfig {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config: BuildConfig = toml::from_str(&data)?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pagegen.toml");
        std::fs::write(&path, "base_path = \"/myrepo\"\nparallel = true\n").unwrap();

        let config = BuildConfig::read(&path).unwrap();
        assert_eq!(config.base_path.as_str(), "/myrepo/");
        assert!(config.parallel);
        assert_eq!(config.content, PathBuf::from("./content"));
        assert_eq!(config.static_dir, Some(PathBuf::from("./static")));
    }

    #[test]
    fn static_key_is_renamed() {
        let config: BuildConfig = toml::from_str("static = \"assets\"").unwrap();
        assert_eq!(config.static_dir, Some(PathBuf::from("assets")));
    }

    #[test]
    fn parse_errors_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pagegen.toml");
        std::fs::write(&path, "clean = \"yes please\"").unwrap();

        assert!(matches!(BuildConfig::read(&path), Err(ConfigError::Parsing(_))));
    }
}
