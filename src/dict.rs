use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

/// Pronunciation dictionary in CMUdict text format.
///
/// Each entry line is `WORD  PH PH PH`; alternate pronunciations carry a
/// `WORD(1)` style suffix and `;;;` starts a comment. Words and phones are
/// stored lower-cased; stress digits on the phones are preserved, since the
/// aligner compares labels verbatim.
#[derive(Debug, Clone, Default)]
pub struct PronunciationDictionary {
    entries: HashMap<String, Vec<Vec<String>>>,
}

impl PronunciationDictionary {
    /// Load a CMUdict-format file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dictionary file: {:?}", path))?;
        Ok(Self::parse(&content))
    }

    /// Parse CMUdict-format text; malformed lines are skipped
    pub fn parse(text: &str) -> Self {
        let mut entries: HashMap<String, Vec<Vec<String>>> = HashMap::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }
            let mut parts = line.split_whitespace();
            let Some(head) = parts.next() else {
                continue;
            };
            let phones: Vec<String> = parts.map(|p| p.to_lowercase()).collect();
            if phones.is_empty() {
                continue;
            }

            // Strip a trailing (N) variant marker
            let word = match head.find('(') {
                Some(idx) => &head[..idx],
                None => head,
            };
            entries.entry(word.to_lowercase()).or_default().push(phones);
        }

        Self { entries }
    }

    /// All pronunciation variants for a lower-cased word
    pub fn lookup(&self, word: &str) -> Option<&[Vec<String>]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    /// The first pronunciation variant, the one the classifier compares
    /// against (alternate variants are kept but unused by policy)
    pub fn first_variant(&self, word: &str) -> Option<&[String]> {
        self.entries
            .get(word)
            .and_then(|variants| variants.first())
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
