//! Core utilities for meshtool build tooling
//!
//! This crate provides shared functionality used by the asset and release tools:
//!
//! - **Error handling**: Structured errors with codes and recovery suggestions
//! - **File scanning**: Directory discovery with extension filters and stable ordering
//! - **Configuration**: TOML-based configuration with defaults for every field
//!
//! # Example
//!
//! ```rust,no_run
//! use meshtool_core::{config::Config, file_scanner::FileScanner};
//! use std::path::Path;
//!
//! // Load .meshtool.toml (or defaults) relative to the project root
//! let config = Config::load(None, Path::new(".")).expect("Invalid configuration");
//! let source_dir = config.resolve(&config.schema.rtttl.source_dir);
//!
//! // List the tone files at the top level of the source directory
//! let files = FileScanner::new(&source_dir)
//!     .with_extensions(&["txt"])
//!     .max_depth(1)
//!     .scan()
//!     .expect("Source directory missing");
//! println!("{} tone files", files.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod file_scanner;

pub use error::{Error, ErrorCode, Result};
