//! Configuration schema definitions
//!
//! Every field has a default so an absent or partial file is valid.

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// General project settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Tone library compiler settings
    #[serde(default)]
    pub rtttl: RtttlConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// General project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Project root, relative paths in the other sections resolve against it
    #[serde(default = "default_project_root")]
    pub project_root: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            project_root: default_project_root(),
        }
    }
}

fn default_project_root() -> String {
    ".".to_string()
}

/// Tone library compiler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RtttlConfig {
    /// Directory holding the tone source files
    #[serde(default = "default_source_dir")]
    pub source_dir: String,

    /// Path of the compiled JSON library
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Extensions of files accepted whenever a tone line is found
    #[serde(default = "default_trusted_extensions")]
    pub trusted_extensions: Vec<String>,

    /// Extensions of files that must also look like a melody
    #[serde(default = "default_mixed_extensions")]
    pub mixed_extensions: Vec<String>,
}

impl Default for RtttlConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            output_file: default_output_file(),
            trusted_extensions: default_trusted_extensions(),
            mixed_extensions: default_mixed_extensions(),
        }
    }
}

fn default_source_dir() -> String {
    "assets/rtttl".to_string()
}

fn default_output_file() -> String {
    "assets/rtttl_library.json".to_string()
}

fn default_trusted_extensions() -> Vec<String> {
    vec!["txt".to_string()]
}

fn default_mixed_extensions() -> Vec<String> {
    vec!["bas".to_string()]
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit log lines as JSON instead of the compact format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
