//! Directory-level compile: discover, parse, assemble, write.

use crate::error::{Result, RtttlError};
use crate::library::{AssemblyStats, ToneLibrary};
use crate::record::{read_tone_file, ParseOutcome, SkipReason, SourceKind, ToneRecord};
use meshtool_core::config::Config;
use meshtool_core::file_scanner::FileScanner;
use meshtool_core::ErrorCode;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where to read tones from and where to write the library.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Directory holding the tone files (top level only)
    pub source_dir: PathBuf,
    /// Library file to write
    pub output_file: PathBuf,
    /// Extensions of files accepted whenever a tone line is found
    pub trusted_extensions: Vec<String>,
    /// Extensions of files that must also look like a melody
    pub mixed_extensions: Vec<String>,
}

impl CompileOptions {
    /// Options with the default `txt` / `bas` extension split.
    pub fn new(source_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_file: output_file.into(),
            trusted_extensions: vec!["txt".to_string()],
            mixed_extensions: vec!["bas".to_string()],
        }
    }

    /// Options from the `[rtttl]` section, resolved against the project root.
    pub fn from_config(config: &Config) -> Self {
        let rtttl = &config.schema.rtttl;
        Self {
            source_dir: config.resolve(&rtttl.source_dir),
            output_file: config.resolve(&rtttl.output_file),
            trusted_extensions: rtttl.trusted_extensions.clone(),
            mixed_extensions: rtttl.mixed_extensions.clone(),
        }
    }
}

/// A file queued for parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as found in the source directory
    pub path: PathBuf,
    /// Trust level from the file's extension
    pub kind: SourceKind,
}

/// A file that produced no record.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    /// File name
    pub file: String,
    /// Why it produced no record
    pub reason: String,
}

/// Summary of a compile run.
#[derive(Debug, Clone, Serialize)]
pub struct CompileReport {
    pub source_dir: PathBuf,
    pub output_file: PathBuf,
    pub trusted_files: usize,
    pub mixed_files: usize,
    pub skipped: usize,
    pub skipped_files: Vec<SkippedFile>,
    #[serde(flatten)]
    pub stats: AssemblyStats,
    pub total_tones: usize,
    pub bytes_written: u64,
}

/// A compiled library and its report, before anything is written.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub library: ToneLibrary,
    pub report: CompileReport,
}

/// Tone library compiler.
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// List source files: every trusted file in path order, then every mixed file.
    ///
    /// Only the top level of the source directory is scanned. An extension
    /// listed as both trusted and mixed counts as trusted.
    pub fn discover(&self) -> Result<Vec<SourceFile>> {
        let dir = &self.options.source_dir;
        let extensions: Vec<&String> = self
            .options
            .trusted_extensions
            .iter()
            .chain(&self.options.mixed_extensions)
            .collect();

        let files = FileScanner::new(dir)
            .with_extensions(extensions.as_slice())
            .max_depth(1)
            .include_hidden(true)
            .scan()
            .map_err(|source| match source.code {
                ErrorCode::DirectoryNotFound => RtttlError::SourceDirNotFound {
                    path: dir.clone(),
                    source,
                },
                _ => source.into(),
            })?;

        let (trusted, mixed): (Vec<SourceFile>, Vec<SourceFile>) = files
            .into_iter()
            .filter_map(|path| {
                let kind = self.kind_of(&path)?;
                Some(SourceFile { path, kind })
            })
            .partition(|s| s.kind == SourceKind::Trusted);

        info!(
            dir = %dir.display(),
            trusted = trusted.len(),
            mixed = mixed.len(),
            "Scanned tone sources"
        );

        Ok(trusted.into_iter().chain(mixed).collect())
    }

    fn kind_of(&self, path: &Path) -> Option<SourceKind> {
        let ext = path.extension()?.to_str()?;
        if self.options.trusted_extensions.iter().any(|e| e == ext) {
            Some(SourceKind::Trusted)
        } else if self.options.mixed_extensions.iter().any(|e| e == ext) {
            Some(SourceKind::Mixed)
        } else {
            None
        }
    }

    /// Discover, parse and assemble without writing.
    pub fn compile(&self) -> Result<Compilation> {
        self.compile_with_progress(|| {})
    }

    /// Like [`Compiler::compile`], calling `tick` once per parsed file.
    pub fn compile_with_progress<F>(&self, tick: F) -> Result<Compilation>
    where
        F: Fn() + Sync,
    {
        let sources = self.discover()?;
        self.compile_sources(&sources, tick)
    }

    /// Parse and assemble an already discovered file list.
    pub fn compile_sources<F>(&self, sources: &[SourceFile], tick: F) -> Result<Compilation>
    where
        F: Fn() + Sync,
    {
        let outcomes = parse_sources(sources, &tick);

        let mut records: Vec<ToneRecord> = Vec::with_capacity(outcomes.len());
        let mut skipped_files = Vec::new();

        for (source, outcome) in sources.iter().zip(outcomes) {
            match outcome {
                ParseOutcome::Accepted(record) => records.push(record),
                ParseOutcome::Skipped(reason) => {
                    log_skip(&source.path, &reason);
                    skipped_files.push(SkippedFile {
                        file: file_label(&source.path),
                        reason: reason.to_string(),
                    });
                }
            }
        }

        let (library, stats) = ToneLibrary::assemble(records);
        info!(
            accepted = stats.accepted,
            content_duplicates = stats.content_duplicates,
            name_duplicates = stats.name_duplicates,
            shadowed = stats.shadowed,
            "Assembled tone library"
        );

        let report = CompileReport {
            source_dir: self.options.source_dir.clone(),
            output_file: self.options.output_file.clone(),
            trusted_files: count_kind(sources, SourceKind::Trusted),
            mixed_files: count_kind(sources, SourceKind::Mixed),
            skipped: skipped_files.len(),
            skipped_files,
            stats,
            total_tones: library.tones.len(),
            bytes_written: 0,
        };

        Ok(Compilation { library, report })
    }

    /// Write a compilation to the configured output file and record its size.
    pub fn write(&self, compilation: &mut Compilation) -> Result<()> {
        let path = &self.options.output_file;
        compilation.report.bytes_written = compilation.library.write_to(path)?;
        info!(
            path = %path.display(),
            bytes = compilation.report.bytes_written,
            "Wrote tone library"
        );
        Ok(())
    }

    /// Compile and write the library.
    pub fn run(&self) -> Result<CompileReport> {
        self.run_with_progress(|| {})
    }

    /// Like [`Compiler::run`], calling `tick` once per parsed file.
    pub fn run_with_progress<F>(&self, tick: F) -> Result<CompileReport>
    where
        F: Fn() + Sync,
    {
        let mut compilation = self.compile_with_progress(tick)?;
        self.write(&mut compilation)?;
        Ok(compilation.report)
    }
}

fn parse_one(source: &SourceFile, tick: &(dyn Fn() + Sync)) -> ParseOutcome {
    let outcome = read_tone_file(&source.path, source.kind);
    tick();
    outcome
}

/// Parse every source; results keep the input order.
#[cfg(feature = "parallel")]
fn parse_sources(sources: &[SourceFile], tick: &(dyn Fn() + Sync)) -> Vec<ParseOutcome> {
    use rayon::prelude::*;
    sources.par_iter().map(|s| parse_one(s, tick)).collect()
}

#[cfg(not(feature = "parallel"))]
fn parse_sources(sources: &[SourceFile], tick: &(dyn Fn() + Sync)) -> Vec<ParseOutcome> {
    sources.iter().map(|s| parse_one(s, tick)).collect()
}

fn log_skip(path: &Path, reason: &SkipReason) {
    match reason {
        SkipReason::Unreadable(e) => warn!(file = %path.display(), error = %e, "Error reading tone file"),
        _ => debug!(file = %path.display(), %reason, "Skipped tone file"),
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn count_kind(sources: &[SourceFile], kind: SourceKind) -> usize {
    sources.iter().filter(|s| s.kind == kind).count()
}
