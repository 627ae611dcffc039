//! Dictionary-based compound word decomposition.
//!
//! Germanic languages glue words together: "Donaudampfschiff" is "Donau",
//! "Dampf" and "Schiff". [`DictionaryDecomposer`] finds such parts by brute
//! force. For every start position of a word it tests every candidate length
//! between `min_subword_size` and `max_subword_size` against a
//! [`WordDictionary`], counting positions and lengths in UTF-16 units.
//! Candidates that would cut a surrogate pair are skipped.
//!
//! [`DictionaryCompoundWordFilter`] runs the decomposer over a token stream.
//! Each word is passed through unchanged and followed by its subwords, in
//! start order, at the same position (position increment 0).
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use decompound::analysis::dictionary::CompoundDictionary;
//! use decompound::analysis::token::Token;
//! use decompound::analysis::token_filter::Filter;
//! use decompound::analysis::token_filter::compound::{
//!     DecompounderConfig, DictionaryCompoundWordFilter, DictionaryDecomposer,
//! };
//!
//! let dictionary = CompoundDictionary::from_words(["donau", "dampf", "schiff"]);
//! let decomposer = DictionaryDecomposer::new(
//!     Arc::new(dictionary),
//!     DecompounderConfig::default(),
//! )
//! .unwrap();
//! let filter = DictionaryCompoundWordFilter::new(decomposer);
//!
//! let tokens = vec![Token::with_offsets("donaudampfschiff", 0, 0, 16)];
//! let texts: Vec<_> = filter
//!     .filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//! assert_eq!(texts, vec!["donaudampfschiff", "donau", "dampf", "schiff"]);
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::analysis::dictionary::WordDictionary;
use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::token_filter::Filter;
use crate::error::{DecompoundError, Result};

/// Words with fewer UTF-16 units are never decomposed.
pub const DEFAULT_MIN_WORD_SIZE: usize = 5;
/// Shortest subword tested.
pub const DEFAULT_MIN_SUBWORD_SIZE: usize = 2;
/// Longest subword tested.
pub const DEFAULT_MAX_SUBWORD_SIZE: usize = 15;

/// Size limits and match policy of a [`DictionaryDecomposer`].
///
/// All sizes are counted in UTF-16 units, the unit of token offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompounderConfig {
    pub min_word_size: usize,
    pub min_subword_size: usize,
    pub max_subword_size: usize,
    /// Keep only the longest match at each start position.
    pub only_longest_match: bool,
}

impl Default for DecompounderConfig {
    fn default() -> Self {
        DecompounderConfig {
            min_word_size: DEFAULT_MIN_WORD_SIZE,
            min_subword_size: DEFAULT_MIN_SUBWORD_SIZE,
            max_subword_size: DEFAULT_MAX_SUBWORD_SIZE,
            only_longest_match: false,
        }
    }
}

impl DecompounderConfig {
    /// Check that every size is positive and the subword range is not empty.
    pub fn validate(&self) -> Result<()> {
        if self.min_word_size == 0 {
            return Err(DecompoundError::invalid_argument(
                "min_word_size must be greater than 0",
            ));
        }
        if self.min_subword_size == 0 {
            return Err(DecompoundError::invalid_argument(
                "min_subword_size must be greater than 0",
            ));
        }
        if self.max_subword_size < self.min_subword_size {
            return Err(DecompoundError::invalid_argument(format!(
                "max_subword_size ({}) must not be smaller than min_subword_size ({})",
                self.max_subword_size, self.min_subword_size
            )));
        }
        Ok(())
    }
}

/// A subword found inside a word.
///
/// Offsets are UTF-16 units relative to the start of the word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompoundToken {
    pub text: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Finds dictionary words inside compound words.
///
/// Immutable after construction; share it between streams with an [`Arc`].
#[derive(Clone)]
pub struct DictionaryDecomposer {
    dictionary: Arc<dyn WordDictionary>,
    config: DecompounderConfig,
}

impl std::fmt::Debug for DictionaryDecomposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryDecomposer")
            .field("dictionary_len", &self.dictionary.len())
            .field("config", &self.config)
            .finish()
    }
}

impl DictionaryDecomposer {
    /// Create a decomposer.
    ///
    /// Fails with [`DecompoundError::InvalidArgument`] when the dictionary is
    /// empty or the configuration is invalid.
    pub fn new(dictionary: Arc<dyn WordDictionary>, config: DecompounderConfig) -> Result<Self> {
        if dictionary.is_empty() {
            return Err(DecompoundError::invalid_argument(
                "compound dictionary must not be empty",
            ));
        }
        config.validate()?;
        Ok(DictionaryDecomposer { dictionary, config })
    }

    pub fn config(&self) -> &DecompounderConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &dyn WordDictionary {
        self.dictionary.as_ref()
    }

    /// All subwords of `word`, in increasing start order.
    pub fn decompose(&self, word: &str) -> Vec<CompoundToken> {
        let mut parts = Vec::new();
        self.decompose_with(word, |part| parts.push(part));
        parts
    }

    /// Run the match loop, handing each subword to `emit`.
    fn decompose_with<F: FnMut(CompoundToken)>(&self, word: &str, mut emit: F) {
        let DecompounderConfig {
            min_word_size,
            min_subword_size,
            max_subword_size,
            only_longest_match,
        } = self.config;

        // byte index of every UTF-16 position, None between the halves of a
        // surrogate pair; the end of the word is included
        let mut byte_at: Vec<Option<usize>> = Vec::with_capacity(word.len() + 1);
        for (byte, c) in word.char_indices() {
            byte_at.push(Some(byte));
            if c.len_utf16() == 2 {
                byte_at.push(None);
            }
        }
        byte_at.push(Some(word.len()));

        let len = byte_at.len() - 1;
        if len < min_word_size || len < min_subword_size {
            return;
        }

        let part_at = |i: usize, j: usize, start_byte: usize, end_byte: usize| CompoundToken {
            text: word[start_byte..end_byte].to_string(),
            start_offset: i,
            end_offset: i + j,
        };

        for i in 0..=len - min_subword_size {
            // a range with a lone surrogate at either end never matches
            let Some(start_byte) = byte_at[i] else {
                continue;
            };
            let mut longest: Option<(usize, usize)> = None;
            for j in min_subword_size..=max_subword_size {
                if i + j > len {
                    break;
                }
                let Some(end_byte) = byte_at[i + j] else {
                    continue;
                };
                let candidate = &word[start_byte..end_byte];
                if !self.dictionary.contains(candidate) {
                    continue;
                }
                trace!("subword {candidate:?} at {i} in {word:?}");
                if only_longest_match {
                    if longest.is_none_or(|(best, _)| j > best) {
                        longest = Some((j, end_byte));
                    }
                } else {
                    emit(part_at(i, j, start_byte, end_byte));
                }
            }
            if let Some((j, end_byte)) = longest {
                emit(part_at(i, j, start_byte, end_byte));
            }
        }
    }

    /// Queue the subword tokens of `word` behind it.
    ///
    /// Keyword tokens are not decomposed.
    fn enqueue_subwords(&self, word: &Token, pending: &mut VecDeque<Token>) {
        if word.is_keyword() {
            return;
        }
        let keep_relative = word.offsets_match_text();
        self.decompose_with(&word.text, |part| {
            let (start, end) = if keep_relative {
                (
                    word.start_offset + part.start_offset,
                    word.start_offset + part.end_offset,
                )
            } else {
                (word.start_offset, word.end_offset)
            };
            pending.push_back(Token {
                text: part.text,
                position: word.position,
                start_offset: start,
                end_offset: end,
                position_increment: 0,
                token_type: TokenType::Subword,
                keyword: false,
            });
        });
    }
}

/// Lazy token iterator that follows every word with its subwords.
///
/// Queued subwords are drained before the next upstream token is pulled.
pub struct CompoundWordStream<I> {
    upstream: I,
    decomposer: Arc<DictionaryDecomposer>,
    pending: VecDeque<Token>,
}

impl<I: Iterator<Item = Token>> CompoundWordStream<I> {
    pub fn new(upstream: I, decomposer: Arc<DictionaryDecomposer>) -> Self {
        CompoundWordStream {
            upstream,
            decomposer,
            pending: VecDeque::new(),
        }
    }
}

impl<I: Iterator<Item = Token>> Iterator for CompoundWordStream<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(subword) = self.pending.pop_front() {
            return Some(subword);
        }
        let token = self.upstream.next()?;
        self.decomposer.enqueue_subwords(&token, &mut self.pending);
        Some(token)
    }
}

/// Token filter adding the dictionary subwords of every compound word.
///
/// Unlike the classic Lucene filter, tokens marked as keywords are passed
/// through without being decomposed.
#[derive(Clone, Debug)]
pub struct DictionaryCompoundWordFilter {
    decomposer: Arc<DictionaryDecomposer>,
}

impl DictionaryCompoundWordFilter {
    pub fn new(decomposer: DictionaryDecomposer) -> Self {
        DictionaryCompoundWordFilter {
            decomposer: Arc::new(decomposer),
        }
    }

    /// Create a filter sharing an existing decomposer.
    pub fn from_shared(decomposer: Arc<DictionaryDecomposer>) -> Self {
        DictionaryCompoundWordFilter { decomposer }
    }

    pub fn decomposer(&self) -> &Arc<DictionaryDecomposer> {
        &self.decomposer
    }
}

impl Filter for DictionaryCompoundWordFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(CompoundWordStream::new(
            tokens,
            Arc::clone(&self.decomposer),
        )))
    }

    fn name(&self) -> &'static str {
        "dictionary_compound_word"
    }
}
