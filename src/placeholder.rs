//! Protect-and-restore table for multi-pass rewrites.
//!
//! A region that later passes must not touch (a line comment, for instance)
//! is parked behind a sentinel token and spliced back in by exact match once
//! every other pass has run.
//!
//! Sentinels are built from Unicode private-use characters and decimal digits
//! only, so no word-boundary, identifier or `.name(` pattern can match inside
//! them. The table picks a salt that does not occur in the text it was created
//! for, which rules out collisions with pre-existing content.

/// Opens a sentinel.
const OPEN: char = '\u{E000}';
/// Separates the salt from the slot index.
const SEP: char = '\u{E001}';
/// Closes a sentinel; makes slot `1` distinct from slot `10`.
const CLOSE: char = '\u{E002}';

/// Ordered list of (sentinel, replacement) pairs for a single call.
#[derive(Debug, Default, Clone)]
pub struct PlaceholderTable {
    prefix:  String,
    entries: Vec<(String, String)>
}

impl PlaceholderTable {
    /// Create a table whose sentinels cannot occur in `text`.
    pub fn for_text(text: &str) -> Self {
        let mut salt = 0u32;
        let prefix = loop {
            let candidate = format!("{OPEN}{salt}{SEP}");
            if !text.contains(&candidate) {
                break candidate;
            }
            salt += 1;
        };
        Self {
            prefix,
            entries: Vec::new()
        }
    }

    /// Register `replacement` and return the sentinel standing in for it.
    pub fn park(&mut self, replacement: String) -> String {
        let sentinel = format!("{}{}{CLOSE}", self.prefix, self.entries.len());
        self.entries.push((sentinel.clone(), replacement));
        sentinel
    }

    /// Splice every parked replacement back into `text`, draining the table.
    ///
    /// Each sentinel must occur exactly once; anything else means a pass
    /// duplicated or destroyed a sentinel.
    pub fn restore(&mut self, text: String) -> String {
        let mut out = text;
        for (sentinel, replacement) in self.entries.drain(..) {
            debug_assert_eq!(
                out.matches(sentinel.as_str()).count(),
                1,
                "placeholder {:?} must occur exactly once",
                sentinel
            );
            out = out.replacen(&sentinel, &replacement, 1);
        }
        out
    }

    /// Number of regions currently parked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `text` still contains a sentinel issued by this table.
    pub fn leaks_into(&self, text: &str) -> bool {
        !self.prefix.is_empty() && text.contains(&self.prefix)
    }
}

/// Whether `text` contains anything shaped like a sentinel.
pub fn contains_sentinel(text: &str) -> bool {
    text.contains(OPEN) && text.contains(CLOSE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_park_and_restore() {
        let mut table = PlaceholderTable::for_text("a // x");
        let token = table.park("<c>// x</c>".to_string());
        let text = format!("a {}", token);
        assert_eq!(table.len(), 1);
        assert_eq!(table.restore(text), "a <c>// x</c>");
        assert!(table.is_empty());
    }

    #[test]
    fn test_slot_ten_does_not_shadow_slot_one() {
        let mut table = PlaceholderTable::for_text("");
        let tokens: Vec<String> = (0..12).map(|i| table.park(format!("[{}]", i))).collect();
        let text = tokens.concat();
        assert_eq!(table.restore(text), "[0][1][2][3][4][5][6][7][8][9][10][11]");
    }

    #[test]
    fn test_salt_avoids_existing_content() {
        let hostile = format!("{OPEN}0{SEP}0{CLOSE}");
        let mut table = PlaceholderTable::for_text(&hostile);
        let token = table.park("X".to_string());
        assert_ne!(token, hostile);
        let text = format!("{}{}", hostile, token);
        assert_eq!(table.restore(text), format!("{}X", hostile));
    }

    #[test]
    fn test_sentinel_has_no_word_characters_but_digits() {
        let mut table = PlaceholderTable::for_text("");
        let token = table.park(String::new());
        assert!(token.chars().all(|c| c.is_ascii_digit() || !c.is_alphanumeric()));
        assert!(contains_sentinel(&token));
        assert!(table.leaks_into(&token));
    }
}
