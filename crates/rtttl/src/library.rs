//! Library assembly and JSON output.

use crate::dedup::{dedup_by_content, dedup_by_name, sort_by_display_name};
use crate::error::{Result, RtttlError};
use crate::presets::{builtin_records, PresetShadow};
use crate::record::ToneRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Schema version written to the library file.
pub const LIBRARY_VERSION: u32 = 1;

/// The compiled tone library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneLibrary {
    pub version: u32,
    pub tones: Vec<ToneRecord>,
}

/// Counts from each assembly phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyStats {
    /// Records entering dedup
    pub accepted: usize,
    /// Records dropped for repeating a tone line
    pub content_duplicates: usize,
    /// Records dropped for repeating a normalized title
    pub name_duplicates: usize,
    /// Records dropped because a preset covers them
    pub shadowed: usize,
    /// Discovered records in the library
    pub discovered: usize,
}

impl ToneLibrary {
    /// Assemble a library from accepted records.
    ///
    /// Records are sorted by title, deduplicated by tone line and then by
    /// normalized title, sorted again, filtered against the presets, and
    /// appended after the presets.
    pub fn assemble(mut records: Vec<ToneRecord>) -> (Self, AssemblyStats) {
        let mut stats = AssemblyStats {
            accepted: records.len(),
            ..AssemblyStats::default()
        };

        sort_by_display_name(&mut records);

        let records = dedup_by_content(records);
        stats.content_duplicates = stats.accepted - records.len();

        let before = records.len();
        let mut records = dedup_by_name(records);
        stats.name_duplicates = before - records.len();

        sort_by_display_name(&mut records);

        let shadow = PresetShadow::new();
        let before = records.len();
        records.retain(|r| !shadow.shadows(r));
        stats.shadowed = before - records.len();
        stats.discovered = records.len();

        let mut tones = builtin_records();
        tones.extend(records);

        (
            Self {
                version: LIBRARY_VERSION,
                tones,
            },
            stats,
        )
    }

    /// Number of built-in entries.
    pub fn builtin_count(&self) -> usize {
        self.tones.iter().filter(|t| t.builtin).count()
    }

    /// Pretty JSON with 2-space indentation; non-ASCII text is kept literal.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the library, creating parent directories. Returns bytes written.
    pub fn write_to(&self, path: &Path) -> Result<u64> {
        let json = self.to_json()?;
        let write_err = |source| RtttlError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, json.as_bytes()).map_err(write_err)?;

        Ok(json.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::normalize_name;
    use crate::presets::BUILTIN_PRESETS;
    use std::collections::HashSet;

    fn tone(name: &str, rtttl: &str) -> ToneRecord {
        ToneRecord {
            filename: format!("{name}.txt"),
            display_name: name.to_string(),
            tone_name: "t".to_string(),
            artist: None,
            rtttl: rtttl.to_string(),
            builtin: false,
        }
    }

    fn discovered_names(library: &ToneLibrary) -> Vec<&str> {
        library.tones[BUILTIN_PRESETS.len()..]
            .iter()
            .map(|t| t.display_name.as_str())
            .collect()
    }

    #[test]
    fn test_empty_input_yields_presets() {
        let (library, stats) = ToneLibrary::assemble(Vec::new());
        assert_eq!(library.version, 1);
        assert_eq!(library.tones.len(), 11);
        assert_eq!(library.builtin_count(), 11);
        assert_eq!(stats, AssemblyStats::default());
    }

    #[test]
    fn test_presets_first_then_sorted() {
        let (library, stats) = ToneLibrary::assemble(vec![
            tone("zebra", "z:d=4:c,d"),
            tone("Apple", "a:d=4:c,d"),
            tone("mango", "m:d=4:c,d"),
        ]);

        for (record, preset) in library.tones.iter().zip(BUILTIN_PRESETS) {
            assert_eq!(record.display_name, preset.display_name);
        }
        assert_eq!(discovered_names(&library), vec!["Apple", "mango", "zebra"]);
        assert_eq!(stats.discovered, 3);
    }

    #[test]
    fn test_mario_version_dropped() {
        let (library, stats) = ToneLibrary::assemble(vec![
            tone("Mario V2", "mario:d=4:e,e,e"),
            tone("Mario", "mario:d=4:e,e,e"),
        ]);
        assert_eq!(discovered_names(&library), vec!["Mario"]);
        assert_eq!(stats.content_duplicates, 1);
    }

    #[test]
    fn test_name_duplicates_counted() {
        let (library, stats) = ToneLibrary::assemble(vec![
            tone("Indiana Jones", "i:d=4:c,d,e"),
            tone("IndianaJones", "i:d=4:c,d"),
        ]);
        assert_eq!(discovered_names(&library), vec!["IndianaJones"]);
        assert_eq!(stats.name_duplicates, 1);
    }

    #[test]
    fn test_presets_shadow_discovered() {
        let (library, stats) = ToneLibrary::assemble(vec![
            tone("PAGER", "p:d=4:c,d"),
            tone("Beep Copy", "24:d=16,o=6,b=200:e,p,e"),
            tone("Keeper", "k:d=4:c,d"),
        ]);
        assert_eq!(discovered_names(&library), vec!["Keeper"]);
        assert_eq!(stats.shadowed, 2);
    }

    #[test]
    fn test_library_invariants_hold() {
        let (library, _) = ToneLibrary::assemble(vec![
            tone("Tetris", "t:d=4:c,d"),
            tone("Tetris_2", "t:d=4:e,f,g"),
            tone("Tetris (Alt)", "t:d=4:c,d"),
            tone("Ping", "x:d=4:c"),
            tone("Song", "24:d=8,o=6,b=200:b,e7"),
        ]);

        let tones: HashSet<_> = library.tones.iter().map(|t| t.rtttl.as_str()).collect();
        let names: HashSet<_> = library.tones.iter().map(|t| normalize_name(&t.display_name)).collect();
        assert_eq!(tones.len(), library.tones.len());
        assert_eq!(names.len(), library.tones.len());
        assert_eq!(discovered_names(&library), vec!["Tetris"]);
    }

    #[test]
    fn test_json_layout() {
        let (library, _) = ToneLibrary::assemble(vec![tone("Für Elise", "fur:d=4:e,d#")]);
        let json = library.to_json().unwrap();

        assert!(json.starts_with("{\n  \"version\": 1,\n  \"tones\": [\n    {\n      \"filename\""));
        assert!(json.contains("\"displayName\": \"Für Elise\""));
        assert!(json.contains("\"builtin\": true"));

        let parsed: ToneLibrary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, library);
    }

    #[test]
    fn test_write_creates_parent() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("assets").join("rtttl_library.json");
        let (library, _) = ToneLibrary::assemble(Vec::new());

        let bytes = library.write_to(&path).unwrap();
        assert_eq!(bytes, std::fs::metadata(&path).unwrap().len());
    }
}
