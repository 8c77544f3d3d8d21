//! Tone records and per-file extraction.

use crate::clean::clean_text;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Separator between artist and title in a file name.
pub const ARTIST_SEPARATOR: &str = " - ";

/// Line prefixes that mark a comment in tone files.
pub const COMMENT_PREFIXES: &[&str] = &["//", "#", "'"];

/// One tone in the compiled library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneRecord {
    /// Source file name including extension
    pub filename: String,
    /// Title shown to users
    pub display_name: String,
    /// Label before the first colon of the tone line
    pub tone_name: String,
    /// Artist split from an `Artist - Title` file name
    pub artist: Option<String>,
    /// The tone definition line
    pub rtttl: String,
    /// Set only on built-in presets
    #[serde(default, skip_serializing_if = "is_false")]
    pub builtin: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// How much a source file is trusted to hold ringtone data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Plain tone files, accepted whenever a tone line is found
    Trusted,
    /// Mixed-format files, accepted only when the tone line looks like a melody
    Mixed,
}

/// Why a file produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file could not be read
    Unreadable(String),
    /// The file had no content after trimming
    Empty,
    /// No non-comment line with a colon
    NoToneLine,
    /// A mixed-format file whose tone line has no notes or no commas
    NotRingtone,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable(e) => write!(f, "unreadable: {e}"),
            SkipReason::Empty => write!(f, "empty file"),
            SkipReason::NoToneLine => write!(f, "no tone line"),
            SkipReason::NotRingtone => write!(f, "not ringtone data"),
        }
    }
}

/// Result of parsing one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The file yielded a record
    Accepted(ToneRecord),
    /// The file was skipped
    Skipped(SkipReason),
}

/// Find the tone definition line in cleaned content.
///
/// The first trimmed, non-blank line that is not a comment and contains a colon.
pub fn extract_tone_line(content: &str) -> Option<&str> {
    content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !COMMENT_PREFIXES.iter().any(|p| line.starts_with(p)))
        .find(|line| line.contains(':'))
}

/// The label before the first colon, trimmed.
pub fn tone_name(rtttl: &str) -> &str {
    rtttl.split_once(':').map_or("", |(name, _)| name.trim())
}

/// Split a cleaned file stem into `(artist, display_name)`.
pub fn split_display_name(stem: &str) -> (Option<String>, String) {
    match stem.split_once(ARTIST_SEPARATOR) {
        Some((artist, title)) => (Some(artist.trim().to_string()), title.trim().to_string()),
        None => (None, stem.to_string()),
    }
}

/// Whether a tone line from a mixed-format file looks like a melody: at
/// least one note or pause letter and at least one comma.
///
/// This is a heuristic. It accepts binary junk that happens to hold a comma
/// and a letter, and rejects single-note tunes.
pub fn looks_like_melody(rtttl: &str) -> bool {
    rtttl.contains(',')
        && rtttl
            .chars()
            .any(|c| matches!(c.to_ascii_lowercase(), 'a'..='g' | 'p'))
}

/// Build a record from already-read file content.
pub fn parse_tone_source(
    filename: &str,
    stem: &str,
    raw_content: &str,
    kind: SourceKind,
) -> ParseOutcome {
    let trimmed = raw_content.trim();
    if trimmed.is_empty() {
        return ParseOutcome::Skipped(SkipReason::Empty);
    }

    let content = clean_text(trimmed);
    let Some(rtttl) = extract_tone_line(&content) else {
        return ParseOutcome::Skipped(SkipReason::NoToneLine);
    };

    if kind == SourceKind::Mixed && !looks_like_melody(rtttl) {
        return ParseOutcome::Skipped(SkipReason::NotRingtone);
    }

    let (artist, display_name) = split_display_name(&clean_text(stem));

    ParseOutcome::Accepted(ToneRecord {
        filename: filename.to_string(),
        display_name,
        tone_name: tone_name(rtttl).to_string(),
        artist,
        rtttl: rtttl.to_string(),
        builtin: false,
    })
}

/// Read and parse one tone file.
///
/// Invalid UTF-8 sequences are dropped rather than failing the file.
pub fn read_tone_file(path: &Path, kind: SourceKind) -> ParseOutcome {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return ParseOutcome::Skipped(SkipReason::Unreadable(e.to_string())),
    };
    let content = String::from_utf8_lossy(&bytes);

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    parse_tone_source(&filename, &stem, &content, kind)
}
