//! Hand-authored tones shipped with every library.

use crate::dedup::normalize_name;
use crate::record::ToneRecord;
use std::collections::HashSet;

/// A built-in tone as static data.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinPreset {
    pub filename: &'static str,
    pub display_name: &'static str,
    pub tone_name: &'static str,
    pub artist: Option<&'static str>,
    pub rtttl: &'static str,
}

/// Built-in presets in library order. The Meshtastic default stays first.
pub static BUILTIN_PRESETS: &[BuiltinPreset] = &[
    BuiltinPreset {
        filename: "_builtin_meshtastic_default",
        display_name: "Meshtastic Default",
        tone_name: "24",
        artist: Some("Meshtastic"),
        rtttl: "24:d=32,o=5,b=565:f6,p,f6,4p,p,f6,p,f6,2p,p,b6,p,b6,p,b6,p,b6,p,b,p,b,p,b,p,b,p,b,p,b,p,b,1p.,2p.,p",
    },
    BuiltinPreset {
        filename: "_builtin_nokia",
        display_name: "Nokia Ringtone",
        tone_name: "24",
        artist: Some("Nokia"),
        rtttl: "24:d=4,o=5,b=180:8e6,8d6,f#,g#,8c#6,8b,d,e,8b,8a,c#,e,2a",
    },
    BuiltinPreset {
        filename: "_builtin_zelda",
        display_name: "Zelda Get Item",
        tone_name: "24",
        artist: Some("Nintendo"),
        rtttl: "24:d=16,o=5,b=120:g,c6,d6,2g6",
    },
    BuiltinPreset {
        filename: "_builtin_mario_coin",
        display_name: "Mario Coin",
        tone_name: "24",
        artist: Some("Nintendo"),
        rtttl: "24:d=8,o=6,b=200:b,e7",
    },
    BuiltinPreset {
        filename: "_builtin_mario_powerup",
        display_name: "Mario Power Up",
        tone_name: "powerup",
        artist: Some("Nintendo"),
        rtttl: "powerup:d=16,o=5,b=200:g,a,b,c6,d6,e6,f#6,g6,a6,b6,2c7",
    },
    BuiltinPreset {
        filename: "_builtin_mario_theme",
        display_name: "Mario Theme",
        tone_name: "24",
        artist: Some("Nintendo"),
        rtttl: "24:d=4,o=5,b=100:16e6,16e6,32p,8e6,16c6,8e6,8g6,8p,8g",
    },
    BuiltinPreset {
        filename: "_builtin_morse_cq",
        display_name: "Morse CQ",
        tone_name: "24",
        artist: None,
        rtttl: "24:d=16,o=6,b=120:8c,p,c,p,8c,p,c,4p,8c,p,8c,p,c,p,8c,8p",
    },
    BuiltinPreset {
        filename: "_builtin_simple_beep",
        display_name: "Simple Beep",
        tone_name: "24",
        artist: None,
        rtttl: "24:d=4,o=5,b=120:c6,p,c6",
    },
    BuiltinPreset {
        filename: "_builtin_alert",
        display_name: "Alert",
        tone_name: "24",
        artist: None,
        rtttl: "24:d=8,o=6,b=140:c,e,g,c7,p,c7,g,e,c",
    },
    BuiltinPreset {
        filename: "_builtin_ping",
        display_name: "Ping",
        tone_name: "24",
        artist: None,
        rtttl: "24:d=16,o=6,b=200:e,p,e",
    },
    BuiltinPreset {
        filename: "_builtin_pager",
        display_name: "Pager",
        tone_name: "Pager",
        artist: None,
        rtttl: "Pager:d=8,o=5,b=160:d6,16p,2d6,16p,d6,16p,2d6,16p,d6,16p,2d6.",
    },
];

impl From<&BuiltinPreset> for ToneRecord {
    fn from(preset: &BuiltinPreset) -> Self {
        ToneRecord {
            filename: preset.filename.to_string(),
            display_name: preset.display_name.to_string(),
            tone_name: preset.tone_name.to_string(),
            artist: preset.artist.map(str::to_string),
            rtttl: preset.rtttl.to_string(),
            builtin: true,
        }
    }
}

/// Presets as library records, in declaration order.
pub fn builtin_records() -> Vec<ToneRecord> {
    BUILTIN_PRESETS.iter().map(ToneRecord::from).collect()
}

/// Lookup of the keys a discovered tone must not share with a preset.
pub struct PresetShadow {
    lowercase_names: HashSet<String>,
    normalized_names: HashSet<String>,
    tones: HashSet<&'static str>,
}

impl PresetShadow {
    /// Build the lookup from [`BUILTIN_PRESETS`].
    pub fn new() -> Self {
        Self {
            lowercase_names: BUILTIN_PRESETS
                .iter()
                .map(|p| p.display_name.to_lowercase())
                .collect(),
            normalized_names: BUILTIN_PRESETS
                .iter()
                .map(|p| normalize_name(p.display_name))
                .collect(),
            tones: BUILTIN_PRESETS.iter().map(|p| p.rtttl).collect(),
        }
    }

    /// Whether a preset takes this record's place in the library.
    pub fn shadows(&self, record: &ToneRecord) -> bool {
        self.lowercase_names.contains(&record.display_name.to_lowercase())
            || self.normalized_names.contains(&normalize_name(&record.display_name))
            || self.tones.contains(record.rtttl.trim())
    }
}

impl Default for PresetShadow {
    fn default() -> Self {
        Self::new()
    }
}
