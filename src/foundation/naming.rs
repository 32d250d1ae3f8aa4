//! Card-name to filename normalization.

use serde::{Deserialize, Serialize};

/// Characters that cannot appear in filenames, with their escape sequences.
const ESCAPES: [(char, &str); 9] = [
    ('<', "{BC}"),
    ('>', "{FC}"),
    (':', "{C}"),
    ('"', "{QT}"),
    ('/', "{FS}"),
    ('\\', "{BS}"),
    ('|', "{B}"),
    ('?', "{QS}"),
    ('*', "{A}"),
];

/// Typographic apostrophe that spreadsheets and file managers substitute for `'`.
pub const RIGHT_SINGLE_QUOTE: char = '\u{2019}';

/// Map a card display name to its file stem.
///
/// The right single quote is folded to `'` first, then every filename-illegal character is
/// replaced by its escape sequence. Escape sequences contain no illegal characters, so the
/// mapping is idempotent.
pub fn normalize_filename(card_name: &str) -> String {
    let mut out = String::with_capacity(card_name.len());
    for ch in card_name.chars() {
        let ch = if ch == RIGHT_SINGLE_QUOTE { '\'' } else { ch };
        match ESCAPES.iter().find(|(bad, _)| *bad == ch) {
            Some((_, escaped)) => out.push_str(escaped),
            None => out.push(ch),
        }
    }
    out
}

/// Fold an on-disk file stem into the form produced by [`normalize_filename`].
pub fn canonical_stem(stem: &str) -> String {
    stem.replace(RIGHT_SINGLE_QUOTE, "'")
}

/// One textual substitution tried when a file cannot be found under its normalized name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenameSubstitution {
    /// Text to replace.
    pub from: String,
    /// Replacement text.
    pub to: String,
}

/// Ordered list of filename spellings to try when resolving a file on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilenameVariants(pub Vec<FilenameSubstitution>);

impl Default for FilenameVariants {
    fn default() -> Self {
        Self(vec![FilenameSubstitution {
            from: "'".to_string(),
            to: RIGHT_SINGLE_QUOTE.to_string(),
        }])
    }
}

impl FilenameVariants {
    /// No alternate spellings; only the normalized name is tried.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    /// Candidate file stems in the order they should be tried, without duplicates.
    pub fn candidates(&self, file_name: &str) -> Vec<String> {
        let mut out = vec![file_name.to_string()];
        for sub in &self.0 {
            if sub.from.is_empty() {
                continue;
            }
            let alt = file_name.replace(&sub.from, &sub.to);
            if !out.contains(&alt) {
                out.push(alt);
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/naming.rs"]
mod tests;
