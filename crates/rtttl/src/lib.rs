//! RTTTL tone library compiler.
//!
//! This crate provides:
//! - Cleanup of encoding artifacts in tone files and file names
//! - Extraction of the tone line, title and artist from each file
//! - Two-pass deduplication (by tone line, then by normalized title)
//! - Built-in presets that always lead the library
//! - JSON output of the compiled library
//!
//! # Example
//!
//! ```rust,no_run
//! use meshtool_rtttl::{CompileOptions, Compiler};
//!
//! let options = CompileOptions::new("assets/rtttl", "assets/rtttl_library.json");
//! let report = Compiler::new(options).run()?;
//! println!("{} tones, {} skipped", report.total_tones, report.skipped);
//! # Ok::<(), meshtool_rtttl::RtttlError>(())
//! ```

pub mod clean;
pub mod compiler;
pub mod dedup;
mod error;
pub mod library;
pub mod presets;
pub mod record;

pub use clean::clean_text;
pub use compiler::{Compilation, CompileOptions, CompileReport, Compiler, SkippedFile, SourceFile};
pub use dedup::{dedup_by_content, dedup_by_name, normalize_name};
pub use error::{Result, RtttlError};
pub use library::{AssemblyStats, ToneLibrary, LIBRARY_VERSION};
pub use presets::{builtin_records, BuiltinPreset, BUILTIN_PRESETS};
pub use record::{parse_tone_source, read_tone_file, ParseOutcome, SkipReason, SourceKind, ToneRecord};
