//! Dictionary entries and the word list loader.
//!
//! The word source is comma-separated text, one record per line:
//!
//! ```text
//! "abate","v.","To lessen in force or intensity"
//! "aberration","n.","A departure from what is normal"
//! ```
//!
//! Field 1 is the word, field 2 its kind (part of speech), field 3 the
//! definition. Quote characters are stripped, commas inside quotes are kept.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{BrowseError, Result};

/// A single dictionary record. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub word: String,
    /// Part of speech or similar tag (the `type` column).
    pub kind: String,
    pub definition: String,
}

impl Entry {
    pub fn new<W, K, D>(word: W, kind: K, definition: D) -> Self
    where
        W: Into<String>,
        K: Into<String>,
        D: Into<String>,
    {
        Self {
            word: word.into(),
            kind: kind.into(),
            definition: definition.into(),
        }
    }
}

/// Ordered, index-addressable, non-empty sequence of entries.
///
/// Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    entries: Vec<Entry>,
}

impl WordList {
    /// Wrap a vector of entries. Fails with `EmptyCollection` when empty.
    pub fn new(entries: Vec<Entry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(BrowseError::EmptyCollection);
        }
        Ok(Self { entries })
    }

    /// Build a list from plain words with empty kind and definition.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            words
                .into_iter()
                .map(|w| Entry::new(w, "", ""))
                .collect(),
        )
    }

    /// Parse comma-separated text. Blank lines are skipped.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let entries: Vec<Entry> = content.lines().filter_map(parse_csv_line).collect();
        debug!(records = entries.len(), "parsed word list");
        Self::new(entries)
    }

    /// Read and parse a word list file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| BrowseError::LoadFailure {
                path: path.to_path_buf(),
                source,
            })?;
        let list = Self::from_csv_str(&content)?;
        info!(path = %path.display(), entries = list.len(), "loaded word list");
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl std::ops::Index<usize> for WordList {
    type Output = Entry;

    fn index(&self, index: usize) -> &Entry {
        &self.entries[index]
    }
}

/// Split one record into entry fields.
///
/// Returns `None` for lines with no content.
fn parse_csv_line(line: &str) -> Option<Entry> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }

    let mut fields: Vec<String> = Vec::with_capacity(3);
    let mut in_quotes = false;
    let mut current = String::new();
    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            '\r' | '\n' => {}
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    let mut fields = fields.into_iter();
    let word = fields.next().unwrap_or_default();
    let kind = fields.next().unwrap_or_default();
    let definition = fields.next().unwrap_or_default();
    Some(Entry {
        word,
        kind,
        definition,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_records() {
        let list = WordList::from_csv_str(
            "\"abate\",\"v.\",\"To lessen\"\n\"aberration\",\"n.\",\"A departure, from the norm\"\n",
        )
        .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], Entry::new("abate", "v.", "To lessen"));
        assert_eq!(list[1].definition, "A departure, from the norm");
    }

    #[test]
    fn unquoted_and_short_records() {
        let list = WordList::from_csv_str("zeal,n.,Great energy\r\nlonely\n\n").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], Entry::new("zeal", "n.", "Great energy"));
        assert_eq!(list[1], Entry::new("lonely", "", ""));
    }

    #[test]
    fn extra_fields_are_ignored() {
        let list = WordList::from_csv_str("a,b,c,d,e").unwrap();
        assert_eq!(list[0], Entry::new("a", "b", "c"));
    }

    #[test]
    fn empty_source_is_rejected() {
        assert!(matches!(
            WordList::from_csv_str("\n  \n"),
            Err(BrowseError::EmptyCollection)
        ));
        assert!(matches!(
            WordList::new(Vec::new()),
            Err(BrowseError::EmptyCollection)
        ));
    }

    #[test]
    fn duplicates_are_kept() {
        let list = WordList::from_words(["echo", "echo"]).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn missing_file_is_a_load_failure() {
        let err = WordList::load("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, BrowseError::LoadFailure { .. }));
    }
}
