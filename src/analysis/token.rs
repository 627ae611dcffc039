//! Token types and utilities for text analysis.
//!
//! This module defines the data structures that flow from the tokenizers
//! through the token filters to the downstream consumer.
//!
//! # Core Types
//!
//! - [`Token`] - A single analyzed token with text, offsets and position data
//! - [`TokenType`] - Classification of token content (alphanumeric, CJK, etc.)
//! - [`TokenStream`] - Type alias for boxed iterator of tokens
//! - [`FallibleTokenStream`] - The same for tokens read from a fallible source
//!
//! # Offsets
//!
//! Offsets are measured in UTF-16 code units of the original input, which is
//! the unit the streaming tokenizer buffers in. For text in the basic
//! multilingual plane this is the same as a character index.
//!
//! # Position increments
//!
//! Subwords produced by compound decomposition are stacked on the position
//! of the word they came from:
//!
//! ```text
//! Input: "Dampfschiff"
//!
//!   Position 0: "dampfschiff" (pos_inc=1)
//!   Position 0: "dampf"       (pos_inc=0)
//!   Position 0: "schiff"      (pos_inc=0)
//! ```
//!
//! # Examples
//!
//! ```
//! use decompound::analysis::token::{Token, TokenType};
//!
//! let token = Token::with_offsets("world", 1, 6, 11).with_token_type(TokenType::Alphanum);
//! assert_eq!(token.text, "world");
//! assert_eq!(token.start_offset, 6);
//! assert_eq!(token.end_offset, 11);
//! assert_eq!(token.token_type, TokenType::Alphanum);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after tokenization.
///
/// # Examples
///
/// ```
/// use decompound::analysis::token::Token;
///
/// let token = Token::new("search", 0).mark_keyword();
/// assert_eq!(token.text, "search");
/// assert!(token.is_keyword());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,

    /// UTF-16 offset where this token starts in the original text
    pub start_offset: usize,

    /// UTF-16 offset where this token ends in the original text
    pub end_offset: usize,

    /// Position increment from the previous token (default: 1).
    ///
    /// Subwords emitted by the compound filter use 0 so they share the
    /// position of the compound they were found in.
    pub position_increment: usize,

    /// Token type classification
    pub token_type: TokenType,

    /// Whether a keyword marker flagged this token as protected
    pub keyword: bool,
}

/// Token type classification for different kinds of tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Alphanumeric text (English, Latin scripts)
    Alphanum,
    /// Numeric values
    Num,
    /// CJK (Chinese, Japanese, Korean) ideographs
    Cjk,
    /// Katakana characters (Japanese)
    Katakana,
    /// Hiragana characters (Japanese)
    Hiragana,
    /// Hangul characters (Korean)
    Hangul,
    /// A whole sentence emitted as one token
    Sentence,
    /// A dictionary subword found inside a compound word
    Subword,
    /// Other/unknown token types
    #[default]
    Other,
}

impl TokenType {
    /// Classify a word by the characters it contains.
    ///
    /// - All numeric → Num
    /// - All Hiragana → Hiragana
    /// - All Katakana → Katakana
    /// - Contains Hangul → Hangul
    /// - Contains CJK → Cjk
    /// - All alphanumeric → Alphanum
    /// - Otherwise → Other
    pub fn detect(word: &str) -> TokenType {
        if word.is_empty() {
            return TokenType::Other;
        }

        if word.chars().all(|c| c.is_numeric()) {
            return TokenType::Num;
        }

        if word.chars().all(|c| matches!(c, '\u{3040}'..='\u{309F}')) {
            return TokenType::Hiragana;
        }

        if word.chars().all(|c| matches!(c, '\u{30A0}'..='\u{30FF}')) {
            return TokenType::Katakana;
        }

        if word
            .chars()
            .any(|c| matches!(c, '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}'))
        {
            return TokenType::Hangul;
        }

        if word.chars().any(|c| {
            matches!(c,
                '\u{4E00}'..='\u{9FFF}' |  // CJK Unified Ideographs
                '\u{3400}'..='\u{4DBF}' |  // CJK Extension A
                '\u{20000}'..='\u{2CEAF}'  // CJK Extensions B-E
            )
        }) {
            return TokenType::Cjk;
        }

        if word.chars().all(|c| c.is_alphanumeric()) {
            return TokenType::Alphanum;
        }

        TokenType::Other
    }
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            position_increment: 1,
            token_type: TokenType::Other,
            keyword: false,
        }
    }

    /// Create a new token with text, position, and offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            start_offset,
            end_offset,
            ..Token::new(text, position)
        }
    }

    /// Number of UTF-16 units in the token text.
    pub fn utf16_len(&self) -> usize {
        self.text.encode_utf16().count()
    }

    /// Number of Unicode scalar values in the token text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the offsets span exactly the token text.
    ///
    /// This stops being true once a filter rewrote the text into something of
    /// a different length (a synonym, a folded form).
    pub fn offsets_match_text(&self) -> bool {
        self.end_offset >= self.start_offset
            && self.end_offset - self.start_offset == self.utf16_len()
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    /// Set the position increment.
    pub fn with_position_increment(mut self, increment: usize) -> Self {
        self.position_increment = increment;
        self
    }

    /// Flag this token as a keyword.
    pub fn mark_keyword(mut self) -> Self {
        self.keyword = true;
        self
    }

    /// Check if this token is flagged as a keyword.
    pub fn is_keyword(&self) -> bool {
        self.keyword
    }

    /// Clone this token with updated text.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        let mut token = self.clone();
        token.text = text.into();
        token
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Tokens read from a source that can fail mid-stream, such as a file.
pub type FallibleTokenStream = Box<dyn Iterator<Item = crate::error::Result<Token>>>;
