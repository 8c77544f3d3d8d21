//! Text cleanup for tone sources.
//!
//! Tone files come from many tools and encodings. Typographic punctuation is
//! folded to ASCII, invisible marks are dropped, and any other character that
//! would not print is removed.

use unicode_general_category::{get_general_category, GeneralCategory};

/// Characters replaced before the printable filter runs.
pub static CHAR_REPLACEMENTS: &[(char, &str)] = &[
    ('\u{201a}', ","),   // single low-9 quotation mark
    ('\u{00a0}', " "),   // no-break space
    ('\u{2018}', "'"),   // left single quote
    ('\u{2019}', "'"),   // right single quote
    ('\u{201c}', "\""),  // left double quote
    ('\u{201d}', "\""),  // right double quote
    ('\u{2013}', "-"),   // en dash
    ('\u{2014}', "-"),   // em dash
    ('\u{2026}', "..."), // ellipsis
    ('\u{00b4}', "'"),   // acute accent
    ('\u{0060}', "'"),   // grave accent
    ('\u{feff}', ""),    // byte order mark
    ('\u{200b}', ""),    // zero-width space
    ('\u{200c}', ""),    // zero-width non-joiner
    ('\u{200d}', ""),    // zero-width joiner
    ('\u{fffd}', ""),    // replacement character
];

fn replacement(c: char) -> Option<&'static str> {
    CHAR_REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

/// Clean a string: apply [`CHAR_REPLACEMENTS`], then drop every
/// non-printable character except `\n`, `\r` and `\t`.
pub fn clean_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match replacement(c) {
            Some(to) => out.push_str(to),
            None if matches!(c, '\n' | '\r' | '\t') || is_printable(c) => out.push(c),
            None => {}
        }
    }
    out
}

/// Whether a character renders visibly.
///
/// Control, format, surrogate, private-use and unassigned code points are
/// not printable, and neither is any separator other than the ASCII space.
pub fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
            | GeneralCategory::SpaceSeparator
    )
}
