//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step in the analysis pipeline: they split input
//! text into tokens. The tokenizers in this crate are built on the streaming
//! [`segmenting::SegmentingTokenizer`] engine, which reads its input through a
//! fixed-size window, splits each window into sentences and hands every
//! sentence to a [`segmenting::SentenceHandler`] that finds the words.
//!
//! # Available Tokenizers
//!
//! - [`SentenceWordTokenizer`] - Unicode words found sentence by sentence
//! - [`SentenceTokenizer`] - One token per sentence
//!
//! Both tokenize in-memory text with [`Tokenizer::tokenize`] and any
//! [`CharSource`] with [`Tokenizer::tokenize_source`], which reads the source
//! lazily through the window as tokens are pulled.
//!
//! # Examples
//!
//! ```
//! use decompound::analysis::tokenizer::{SentenceWordTokenizer, Tokenizer};
//!
//! let tokenizer = SentenceWordTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world. Bye!").unwrap().collect();
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[2].text, "Bye");
//! ```

use crate::analysis::char_source::{CharSource, Utf16Source};
use crate::analysis::offset::{IdentityCorrector, OffsetCorrector};
use crate::analysis::sentence::UnicodeSentenceBoundaries;
use crate::analysis::token::{FallibleTokenStream, TokenStream};
use crate::error::{DecompoundError, Result};

pub mod segmenting;
pub mod sentence;
pub mod unicode_word;

pub use segmenting::{
    DEFAULT_BUFFER_SIZE, SegmenterConfig, SegmentingTokenizer, SentenceHandler, TokenizerState,
    WordSpan,
};
pub use sentence::WholeSentenceHandler;
pub use unicode_word::UnicodeWordHandler;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so one tokenizer definition can be
/// shared by concurrent analysis jobs.
///
/// # Examples
///
/// Implementing a custom tokenizer:
///
/// ```
/// use decompound::analysis::token::{Token, TokenStream};
/// use decompound::analysis::tokenizer::Tokenizer;
/// use decompound::error::Result;
///
/// struct CommaTokenizer;
///
/// impl Tokenizer for CommaTokenizer {
///     fn tokenize(&self, text: &str) -> Result<TokenStream> {
///         let tokens: Vec<Token> = text
///             .split(',')
///             .enumerate()
///             .map(|(i, s)| Token::new(s.trim(), i))
///             .collect();
///         Ok(Box::new(tokens.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "comma"
///     }
/// }
/// ```
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Tokenize, mapping every token offset through `corrector`.
    ///
    /// Used when a char filter rewrote the text. The default implementation
    /// corrects the offsets of [`tokenize`](Self::tokenize)'s output.
    fn tokenize_corrected(
        &self,
        text: &str,
        corrector: Box<dyn OffsetCorrector>,
    ) -> Result<TokenStream> {
        let tokens = self.tokenize(text)?.map(move |mut token| {
            token.start_offset = corrector.correct_offset(token.start_offset);
            token.end_offset = corrector.correct_offset(token.end_offset);
            token
        });
        Ok(Box::new(tokens))
    }

    /// Tokenize a character stream without reading it into memory first.
    ///
    /// Tokens are produced as the returned stream is pulled; read failures
    /// show up as `Err` items. Tokenizers that need their whole input fail
    /// with [`DecompoundError::Analysis`].
    fn tokenize_source(&self, _source: Box<dyn CharSource>) -> Result<FallibleTokenStream> {
        Err(DecompoundError::analysis(format!(
            "tokenizer '{}' cannot read character streams",
            self.name()
        )))
    }

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Runs a segmenting tokenizer lazily over `text`.
fn segment_text<H: SentenceHandler + 'static>(
    text: &str,
    handler: H,
    config: SegmenterConfig,
    corrector: Box<dyn OffsetCorrector>,
) -> Result<TokenStream> {
    let tokenizer = SegmentingTokenizer::new(
        Utf16Source::from(text),
        UnicodeSentenceBoundaries::new(),
        handler,
        config,
    )?
    .with_offset_corrector(corrector);
    // reading an in-memory source never fails
    Ok(Box::new(tokenizer.map_while(|token| token.ok())))
}

/// Runs a segmenting tokenizer over a stream.
fn segment_source<H: SentenceHandler + 'static>(
    source: Box<dyn CharSource>,
    handler: H,
    config: SegmenterConfig,
) -> Result<FallibleTokenStream> {
    let tokenizer =
        SegmentingTokenizer::new(source, UnicodeSentenceBoundaries::new(), handler, config)?;
    Ok(Box::new(tokenizer))
}

/// Splits text into sentences (UAX #29) and each sentence into Unicode words.
///
/// Punctuation and whitespace segments are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct SentenceWordTokenizer {
    config: SegmenterConfig,
}

impl SentenceWordTokenizer {
    /// Create a tokenizer with the default window size and codepoint mode.
    pub fn new() -> Self {
        SentenceWordTokenizer::default()
    }

    /// Create a tokenizer with explicit segmenter settings.
    pub fn with_config(config: SegmenterConfig) -> Self {
        SentenceWordTokenizer { config }
    }
}

impl Tokenizer for SentenceWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        segment_text(text, UnicodeWordHandler::new(), self.config, Box::new(IdentityCorrector))
    }

    fn tokenize_corrected(
        &self,
        text: &str,
        corrector: Box<dyn OffsetCorrector>,
    ) -> Result<TokenStream> {
        segment_text(text, UnicodeWordHandler::new(), self.config, corrector)
    }

    fn tokenize_source(&self, source: Box<dyn CharSource>) -> Result<FallibleTokenStream> {
        segment_source(source, UnicodeWordHandler::new(), self.config)
    }

    fn name(&self) -> &'static str {
        "sentence_word"
    }
}

/// Emits every sentence (UAX #29), trimmed of surrounding whitespace, as one token.
#[derive(Clone, Copy, Debug, Default)]
pub struct SentenceTokenizer {
    config: SegmenterConfig,
}

impl SentenceTokenizer {
    /// Create a tokenizer with the default window size and codepoint mode.
    pub fn new() -> Self {
        SentenceTokenizer::default()
    }

    /// Create a tokenizer with explicit segmenter settings.
    pub fn with_config(config: SegmenterConfig) -> Self {
        SentenceTokenizer { config }
    }
}

impl Tokenizer for SentenceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        segment_text(text, WholeSentenceHandler::new(), self.config, Box::new(IdentityCorrector))
    }

    fn tokenize_corrected(
        &self,
        text: &str,
        corrector: Box<dyn OffsetCorrector>,
    ) -> Result<TokenStream> {
        segment_text(text, WholeSentenceHandler::new(), self.config, corrector)
    }

    fn tokenize_source(&self, source: Box<dyn CharSource>) -> Result<FallibleTokenStream> {
        segment_source(source, WholeSentenceHandler::new(), self.config)
    }

    fn name(&self) -> &'static str {
        "sentence"
    }
}
