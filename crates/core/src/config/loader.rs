//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed configuration values
    pub schema: ConfigSchema,
    /// File the values were read from, if any
    pub path: Option<PathBuf>,
    /// Directory relative paths resolve against
    pub root: PathBuf,
}

impl Config {
    /// Load configuration from a file path, or the first standard location
    /// under `root`, or use defaults
    pub fn load(path: Option<&Path>, root: &Path) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(root),
        };

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        let root = root.join(&schema.general.project_root);

        Ok(Self {
            schema,
            path: config_path,
            root,
        })
    }

    /// Defaults only (no file), rooted at `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
            root: root.into(),
        }
    }

    /// Resolve a configured path against the project root
    #[must_use]
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}

/// Find configuration file in standard locations
fn find_config_file(root: &Path) -> Option<PathBuf> {
    let candidates = [
        ".meshtool.toml",
        "meshtool.toml",
        ".config/meshtool.toml",
    ];

    candidates
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|p| p.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::new(
            ErrorCode::ConfigError,
            format!("Failed to read config file {}: {}", path.display(), e),
        )
        .with_source(e)
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::new(
            ErrorCode::ConfigParseError,
            format!("Failed to parse config file {}: {}", path.display(), e),
        )
        .with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(None, dir.path()).unwrap();

        assert!(config.path.is_none());
        assert_eq!(config.schema.rtttl.source_dir, "assets/rtttl");
        assert_eq!(
            config.resolve("assets/rtttl"),
            dir.path().join(".").join("assets/rtttl")
        );
    }

    #[test]
    fn test_config_discovered_in_root() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".meshtool.toml"),
            "[rtttl]\noutput_file = \"out/library.json\"\n",
        )
        .unwrap();

        let config = Config::load(None, dir.path()).unwrap();
        assert!(config.path.is_some());
        assert_eq!(config.schema.rtttl.output_file, "out/library.json");
    }

    #[test]
    fn test_config_explicit_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml")), dir.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meshtool.toml");
        std::fs::write(&path, "[rtttl\nsource_dir = 3").unwrap();

        let err = Config::load(Some(&path), dir.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }
}
