//! Two-pass deduplication of discovered tones.
//!
//! The first pass collapses records with the same tone line, the second
//! collapses records whose titles normalize to the same key. Both tie-break
//! rules are heuristics kept stable so repeated builds produce the same
//! library.

use crate::record::ToneRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::hash::Hash;

static VERSION_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[vV]?\d+$").unwrap());
static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[\(\[].*?[\)\]]").unwrap());
static NUMBER_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[-_]\s*\d+$").unwrap());
static V_NUMBER_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[vV]\d+$").unwrap());
static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]").unwrap());

/// Whether a title ends in a version marker such as `V2`, `v10` or `3`.
pub fn has_version_suffix(name: &str) -> bool {
    VERSION_SUFFIX.is_match(name)
}

/// Dedup key for titles.
///
/// `"Indiana Jones (Theme) v2"` and `"IndianaJones"` both become `"indianajones"`.
pub fn normalize_name(name: &str) -> String {
    let name = BRACKETED.replace_all(name, "");
    let name = NUMBER_SUFFIX.replace_all(&name, "");
    let name = V_NUMBER_SUFFIX.replace_all(&name, "");
    NON_ALNUM
        .replace_all(&name.to_lowercase(), "")
        .into_owned()
}

/// Collapse records sharing a key.
///
/// A group keeps the slot of its first record; `prefer(incumbent, challenger)`
/// decides whether a later record replaces the one in that slot.
pub fn dedup_by<K, F, P>(records: Vec<ToneRecord>, key: F, prefer: P) -> Vec<ToneRecord>
where
    K: Eq + Hash,
    F: Fn(&ToneRecord) -> K,
    P: Fn(&ToneRecord, &ToneRecord) -> bool,
{
    let mut kept: Vec<ToneRecord> = Vec::with_capacity(records.len());
    let mut slots: HashMap<K, usize> = HashMap::with_capacity(records.len());

    for record in records {
        let k = key(&record);
        match slots.get(&k) {
            Some(&slot) => {
                if prefer(&kept[slot], &record) {
                    kept[slot] = record;
                }
            }
            None => {
                slots.insert(k, kept.len());
                kept.push(record);
            }
        }
    }

    kept
}

/// Content pass: a title without a version suffix beats one with a suffix,
/// otherwise the strictly shorter title wins.
pub fn prefer_cleaner_name(incumbent: &ToneRecord, challenger: &ToneRecord) -> bool {
    match (
        has_version_suffix(&incumbent.display_name),
        has_version_suffix(&challenger.display_name),
    ) {
        (true, false) => true,
        (false, true) => false,
        _ => char_len(&challenger.display_name) < char_len(&incumbent.display_name),
    }
}

/// Name pass: the strictly shorter tone line wins; on a tie a spaced title
/// beats an unspaced one.
pub fn prefer_simpler_tone(incumbent: &ToneRecord, challenger: &ToneRecord) -> bool {
    let (old_len, new_len) = (char_len(&incumbent.rtttl), char_len(&challenger.rtttl));
    if new_len != old_len {
        return new_len < old_len;
    }
    challenger.display_name.contains(' ') && !incumbent.display_name.contains(' ')
}

/// First pass: one record per distinct tone line.
pub fn dedup_by_content(records: Vec<ToneRecord>) -> Vec<ToneRecord> {
    dedup_by(records, |r| r.rtttl.trim().to_string(), prefer_cleaner_name)
}

/// Second pass: one record per normalized title.
pub fn dedup_by_name(records: Vec<ToneRecord>) -> Vec<ToneRecord> {
    dedup_by(records, |r| normalize_name(&r.display_name), prefer_simpler_tone)
}

/// Stable case-insensitive sort by title.
pub fn sort_by_display_name(records: &mut [ToneRecord]) {
    records.sort_by_cached_key(|r| r.display_name.to_lowercase());
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
