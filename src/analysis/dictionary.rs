//! Word dictionaries for compound decomposition.
//!
//! The decomposer only needs membership tests, expressed by the
//! [`WordDictionary`] trait. [`CompoundDictionary`] is the hash-set backed
//! implementation; it can be built from any word iterator or loaded from a
//! file.
//!
//! Lookups are exact and case-sensitive: lowercase the tokens (see
//! [`LowercaseFilter`](crate::analysis::token_filter::lowercase::LowercaseFilter))
//! when the dictionary is lowercase.

use std::path::Path;

use ahash::AHashSet;

use crate::error::{DecompoundError, Result};

/// Membership test over a set of words.
///
/// Must be safe to share between threads; decomposers only read it.
pub trait WordDictionary: Send + Sync {
    /// Whether `word` is in the dictionary.
    fn contains(&self, word: &str) -> bool;

    /// Number of entries, when known.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hash-set backed word dictionary.
#[derive(Clone, Debug, Default)]
pub struct CompoundDictionary {
    words: AHashSet<String>,
}

impl CompoundDictionary {
    /// Build a dictionary from words. Empty strings are ignored.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = words
            .into_iter()
            .map(Into::into)
            .filter(|w: &String| !w.is_empty())
            .collect();
        CompoundDictionary { words }
    }

    /// Load a dictionary from a file.
    ///
    /// Files ending in `.json` must hold a JSON array of strings:
    ///
    /// ```json
    /// ["donau", "dampf", "schiff", "fahrt"]
    /// ```
    ///
    /// Any other file is read as a plain word list with one word per line.
    /// Blank lines and lines starting with `#` are skipped, and a leading
    /// byte-order mark is ignored.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DecompoundError::dictionary(format!(
                "Failed to read dictionary file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let dictionary = if is_json {
            Self::from_json(&content).map_err(|e| {
                DecompoundError::dictionary(format!(
                    "Failed to parse dictionary JSON from '{}': {}",
                    path.display(),
                    e
                ))
            })?
        } else {
            Self::from_word_list(&content)
        };

        log::debug!(
            "loaded {} dictionary entries from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    /// Parse a JSON array of words.
    pub fn from_json(json: &str) -> Result<Self> {
        let words: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::from_words(words))
    }

    /// Parse a plain word list, one word per line.
    pub fn from_word_list(content: &str) -> Self {
        let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
        Self::from_words(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Add a word. Returns whether it was new.
    pub fn insert<S: Into<String>>(&mut self, word: S) -> bool {
        let word = word.into();
        !word.is_empty() && self.words.insert(word)
    }

    /// Iterate over the entries in no particular order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl WordDictionary for CompoundDictionary {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    fn len(&self) -> usize {
        self.words.len()
    }
}

impl<S: Into<String>> FromIterator<S> for CompoundDictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        CompoundDictionary::from_words(iter)
    }
}
