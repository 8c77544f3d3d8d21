//! rtttl-library: compile the app's RTTTL tone files into one JSON library.
//!
//! With no arguments it reads `assets/rtttl` under the current directory and
//! writes `assets/rtttl_library.json`.

use anyhow::{Context, Result};
use clap::Parser;
use meshtool_cli::output::{format_count, format_duration, format_size, Status};
use meshtool_cli::progress::{file_progress, finish_clear};
use meshtool_core::config::Config;
use meshtool_core::error::exit_codes;
use meshtool_rtttl::{CompileOptions, CompileReport, Compiler};
use meshtool_telemetry::{TelemetryConfig, Timer};
use std::path::PathBuf;
use std::process::ExitCode;

/// Compile RTTTL tone files into the app's JSON tone library
#[derive(Parser)]
#[command(name = "rtttl-library")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Project root that configured paths resolve against
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Tone source directory (overrides the configured one)
    #[arg(long)]
    source: Option<PathBuf>,

    /// Output JSON file (overrides the configured one)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Configuration file (default: .meshtool.toml in the project root)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn json(&self) -> bool {
        self.format == "json"
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(e) => {
            Status::error(&format!("{e:#}"));
            ExitCode::from(exit_codes::FAILURE)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref(), &cli.root)?;

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        config.schema.logging.level.as_str()
    };
    meshtool_telemetry::init_with_config(TelemetryConfig {
        json: config.schema.logging.json,
        ..TelemetryConfig::with_level(level)
    })?;

    let mut options = CompileOptions::from_config(&config);
    if let Some(source) = &cli.source {
        options.source_dir = source.clone();
    }
    if let Some(output) = &cli.output {
        options.output_file = output.clone();
    }
    tracing::debug!(?options, config = ?config.path, "Resolved options");

    let text = !cli.json() && !cli.quiet;
    let timer = Timer::start("rtttl_compile");
    let compiler = Compiler::new(options);

    if text {
        Status::info(&format!("Scanning {}...", compiler.options().source_dir.display()));
    }
    let sources = compiler.discover()?;

    let pb = file_progress(sources.len() as u64, !text);
    let mut compilation = compiler.compile_sources(&sources, || pb.inc(1))?;
    finish_clear(&pb);

    compiler
        .write(&mut compilation)
        .context("Could not write the tone library")?;
    let elapsed = timer.stop();

    let report = &compilation.report;
    if cli.json() {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else if text {
        print_summary(report, &compiler, elapsed);
    }

    Ok(())
}

fn print_summary(report: &CompileReport, compiler: &Compiler, elapsed: std::time::Duration) {
    let options = compiler.options();

    Status::info(&format!(
        "Found {} ({})",
        format_count(report.trusted_files, "trusted file", "trusted files"),
        extension_list(&options.trusted_extensions)
    ));
    Status::info(&format!(
        "Found {} ({})",
        format_count(report.mixed_files, "mixed file", "mixed files"),
        extension_list(&options.mixed_extensions)
    ));

    if report.stats.content_duplicates + report.stats.name_duplicates + report.stats.shadowed > 0 {
        Status::info(&format!(
            "Removed {} duplicate tones and {} covered by presets",
            report.stats.content_duplicates + report.stats.name_duplicates,
            report.stats.shadowed
        ));
    }

    Status::success(&format!(
        "Wrote {} ({} with presets) to {} in {}",
        format_count(report.stats.discovered, "tone", "tones"),
        report.total_tones,
        report.output_file.display(),
        format_duration(elapsed)
    ));
    Status::info(&format!("Output file size: {}", format_size(report.bytes_written)));

    if report.skipped > 0 {
        Status::warning(&format!(
            "Skipped {}",
            format_count(report.skipped, "invalid file", "invalid files")
        ));
    } else {
        Status::info("Skipped 0 invalid files");
    }
}

fn extension_list(extensions: &[String]) -> String {
    extensions
        .iter()
        .map(|e| format!("*.{e}"))
        .collect::<Vec<_>>()
        .join(", ")
}
