//! Streaming sentence-then-word tokenizer engine.
//!
//! [`SegmentingTokenizer`] reads its input through a fixed-capacity window of
//! UTF-16 units. Each time the window is refilled, unprocessed units from the
//! previous fill move to the front and fresh input is read behind them. Only
//! the prefix up to the last hard line break (see
//! [`is_hard_break`](crate::analysis::sentence::is_hard_break)) is segmented,
//! so sentences are never cut by the window edge unless a single line is
//! longer than the window.
//!
//! Sentence boundaries come from a [`SentenceBoundaries`] detector and words
//! from a [`SentenceHandler`]. The engine itself knows nothing about words.
//!
//! Token offsets are absolute positions in the input stream, passed once
//! through the configured [`OffsetCorrector`].
//!
//! # Examples
//!
//! ```
//! use decompound::analysis::char_source::Utf16Source;
//! use decompound::analysis::sentence::HardBreakBoundaries;
//! use decompound::analysis::tokenizer::{SegmenterConfig, SegmentingTokenizer, UnicodeWordHandler};
//!
//! let source = Utf16Source::from("alpha beta\ngamma");
//! let mut tokenizer = SegmentingTokenizer::new(
//!     source,
//!     HardBreakBoundaries::new(),
//!     UnicodeWordHandler::new(),
//!     SegmenterConfig::default(),
//! )
//! .unwrap();
//!
//! let mut words = Vec::new();
//! while let Some(token) = tokenizer.increment_token().unwrap() {
//!     words.push(token.text);
//! }
//! assert_eq!(words, vec!["alpha", "beta", "gamma"]);
//! assert_eq!(tokenizer.end(), 16);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::char_source::{CharSource, read_fully};
use crate::analysis::character::{CharacterBuffer, CharacterMode, is_high_surrogate};
use crate::analysis::offset::{IdentityCorrector, OffsetCorrector};
use crate::analysis::sentence::{SentenceBoundaries, is_hard_break};
use crate::analysis::token::{Token, TokenType};
use crate::error::Result;

/// Default window capacity in UTF-16 units.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// A word found by a [`SentenceHandler`], in window-relative units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordSpan {
    pub start: usize,
    pub end: usize,
    pub token_type: TokenType,
}

impl WordSpan {
    pub fn new(start: usize, end: usize, token_type: TokenType) -> Self {
        WordSpan {
            start,
            end,
            token_type,
        }
    }
}

/// Finds words inside one sentence of the current window.
///
/// `text` is always the segmentable part of the window, the same slice for
/// [`set_next_sentence`](Self::set_next_sentence) and every following
/// [`increment_word`](Self::increment_word) call.
pub trait SentenceHandler {
    /// Begin a new sentence spanning `text[sentence_start..sentence_end]`.
    fn set_next_sentence(&mut self, text: &[u16], sentence_start: usize, sentence_end: usize);

    /// Produce the next word of the current sentence, or `None` once the
    /// sentence is exhausted.
    fn increment_word(&mut self, text: &[u16]) -> Option<WordSpan>;

    /// Forget any per-stream state.
    fn reset(&mut self) {}
}

impl<H: SentenceHandler + ?Sized> SentenceHandler for Box<H> {
    fn set_next_sentence(&mut self, text: &[u16], sentence_start: usize, sentence_end: usize) {
        (**self).set_next_sentence(text, sentence_start, sentence_end)
    }

    fn increment_word(&mut self, text: &[u16]) -> Option<WordSpan> {
        (**self).increment_word(text)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// Where the tokenizer is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenizerState {
    /// Created or reset, nothing read yet.
    Unstarted,
    /// Reading input into the window.
    Filling,
    /// Moving to the next sentence of the window.
    Segmenting,
    /// Handing out words of the current sentence.
    Emitting,
    /// Input exhausted; every further call yields nothing.
    Done,
}

/// Window and surrogate settings of a [`SegmentingTokenizer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Window capacity in UTF-16 units, at least 2.
    pub buffer_size: usize,
    /// Whether forced splits avoid cutting surrogate pairs.
    pub mode: CharacterMode,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        SegmenterConfig {
            buffer_size: DEFAULT_BUFFER_SIZE,
            mode: CharacterMode::Codepoint,
        }
    }
}

/// Streaming tokenizer that segments its input into sentences, then words.
pub struct SegmentingTokenizer<S, B, H> {
    source: S,
    boundaries: B,
    handler: H,
    mode: CharacterMode,
    buffer: CharacterBuffer,
    /// Units of the window that are segmented; the rest waits for the next fill.
    usable_length: usize,
    /// Stream offset of the first unit of the window.
    offset: usize,
    position: usize,
    state: TokenizerState,
    corrector: Box<dyn OffsetCorrector>,
}

impl<S, B, H> SegmentingTokenizer<S, B, H>
where
    S: CharSource,
    B: SentenceBoundaries,
    H: SentenceHandler,
{
    /// Create a tokenizer reading from `source`.
    ///
    /// Fails when `config.buffer_size` is below 2.
    pub fn new(source: S, boundaries: B, handler: H, config: SegmenterConfig) -> Result<Self> {
        Ok(SegmentingTokenizer {
            source,
            boundaries,
            handler,
            mode: config.mode,
            buffer: CharacterBuffer::new(config.buffer_size)?,
            usable_length: 0,
            offset: 0,
            position: 0,
            state: TokenizerState::Unstarted,
            corrector: Box::new(IdentityCorrector),
        })
    }

    /// Map every emitted offset through `corrector`.
    pub fn with_offset_corrector(mut self, corrector: Box<dyn OffsetCorrector>) -> Self {
        self.corrector = corrector;
        self
    }

    pub fn state(&self) -> TokenizerState {
        self.state
    }

    /// Produce the next token, or `Ok(None)` once the input is exhausted.
    ///
    /// Read failures are returned as errors and end the stream.
    pub fn increment_token(&mut self) -> Result<Option<Token>> {
        if self.state == TokenizerState::Done {
            return Ok(None);
        }

        let span = match self.next_word() {
            Some(span) => span,
            None => loop {
                if let Some(span) = self.next_sentence() {
                    break span;
                }
                if let Err(e) = self.refill() {
                    self.state = TokenizerState::Done;
                    return Err(e);
                }
                if self.buffer.is_empty() {
                    debug!("segmenting tokenizer exhausted at offset {}", self.offset);
                    self.state = TokenizerState::Done;
                    return Ok(None);
                }
            },
        };

        self.state = TokenizerState::Emitting;
        Ok(Some(self.make_token(span)))
    }

    /// Final corrected offset: the total number of units consumed so far.
    pub fn end(&self) -> usize {
        self.corrector.correct_offset(self.offset + self.buffer.len())
    }

    /// Clear all state and start over on `source`.
    pub fn reset(&mut self, source: S) {
        self.source = source;
        self.buffer.reset();
        self.usable_length = 0;
        self.offset = 0;
        self.position = 0;
        self.boundaries.set_text(&[]);
        self.handler.reset();
        self.state = TokenizerState::Unstarted;
    }

    fn next_word(&mut self) -> Option<WordSpan> {
        if self.buffer.is_empty() {
            return None;
        }
        let window = &self.buffer.buffer()[..self.usable_length];
        self.handler.increment_word(window)
    }

    /// Advance through sentences until one yields a word.
    fn next_sentence(&mut self) -> Option<WordSpan> {
        if self.buffer.is_empty() {
            return None;
        }
        loop {
            let start = self.boundaries.current()?;
            let end = self.boundaries.next_boundary()?;
            self.state = TokenizerState::Segmenting;

            let window = &self.buffer.buffer()[..self.usable_length];
            self.handler.set_next_sentence(window, start, end);
            if let Some(span) = self.handler.increment_word(window) {
                return Some(span);
            }
        }
    }

    /// Slide the unprocessed tail to the front and read more input.
    fn refill(&mut self) -> Result<()> {
        self.state = TokenizerState::Filling;
        self.offset += self.usable_length;

        let length = self.buffer.len();
        let leftover = length - self.usable_length;
        let capacity = self.buffer.capacity();
        let storage = self.buffer.buffer_mut();
        storage.copy_within(self.usable_length..length, 0);

        let requested = capacity - leftover;
        let returned = read_fully(&mut self.source, &mut storage[leftover..])?;
        let length = leftover + returned;

        self.usable_length = if returned < requested {
            // source exhausted: everything left is segmentable
            length
        } else {
            match storage[..length].iter().rposition(|&unit| is_hard_break(unit)) {
                Some(last_break) => last_break + 1,
                None => {
                    debug!(
                        "no hard break in {length} units at offset {}, splitting window",
                        self.offset
                    );
                    if self.mode.is_codepoint_aware() && is_high_surrogate(storage[length - 1]) {
                        length - 1
                    } else {
                        length
                    }
                }
            }
        };

        self.buffer.set_len(length)?;
        self.boundaries.set_text(&self.buffer.buffer()[..self.usable_length]);
        Ok(())
    }

    fn make_token(&mut self, span: WordSpan) -> Token {
        let text = String::from_utf16_lossy(&self.buffer.buffer()[span.start..span.end]);
        let start = self.corrector.correct_offset(self.offset + span.start);
        let end = self.corrector.correct_offset(self.offset + span.end);

        let token = Token::with_offsets(text, self.position, start, end)
            .with_token_type(span.token_type);
        self.position += 1;
        token
    }
}

impl<S, B, H> Iterator for SegmentingTokenizer<S, B, H>
where
    S: CharSource,
    B: SentenceBoundaries,
    H: SentenceHandler,
{
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.increment_token().transpose()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::analysis::char_source::Utf16Source;
    use crate::analysis::sentence::{HardBreakBoundaries, UnicodeSentenceBoundaries};
    use crate::analysis::tokenizer::{UnicodeWordHandler, WholeSentenceHandler};
    use crate::error::DecompoundError;

    fn config(buffer_size: usize, mode: CharacterMode) -> SegmenterConfig {
        SegmenterConfig { buffer_size, mode }
    }

    fn spans(text: &str, buffer_size: usize, mode: CharacterMode) -> Vec<Token> {
        let tokenizer = SegmentingTokenizer::new(
            Utf16Source::from(text),
            HardBreakBoundaries::new(),
            WholeSentenceHandler::untrimmed(),
            config(buffer_size, mode),
        )
        .unwrap();
        tokenizer.collect::<Result<Vec<_>>>().unwrap()
    }

    #[test]
    fn test_words_across_sentences() {
        let mut tokenizer = SegmentingTokenizer::new(
            Utf16Source::from("Hello world. How are you?"),
            UnicodeSentenceBoundaries::new(),
            UnicodeWordHandler::new(),
            SegmenterConfig::default(),
        )
        .unwrap();
        assert_eq!(tokenizer.state(), TokenizerState::Unstarted);

        let first = tokenizer.increment_token().unwrap().unwrap();
        assert_eq!(first.text, "Hello");
        assert_eq!((first.start_offset, first.end_offset), (0, 5));
        assert_eq!(tokenizer.state(), TokenizerState::Emitting);

        let rest: Vec<Token> = tokenizer.by_ref().map(|t| t.unwrap()).collect();
        let texts: Vec<_> = rest.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["world", "How", "are", "you"]);
        assert_eq!((rest[1].start_offset, rest[1].end_offset), (13, 16));
        assert_eq!(rest[3].position, 4);

        assert_eq!(tokenizer.state(), TokenizerState::Done);
        assert_eq!(tokenizer.end(), 25);
        assert!(tokenizer.increment_token().unwrap().is_none());
    }

    #[test]
    fn test_empty_input() {
        let mut tokenizer = SegmentingTokenizer::new(
            Utf16Source::from(""),
            UnicodeSentenceBoundaries::new(),
            UnicodeWordHandler::new(),
            SegmenterConfig::default(),
        )
        .unwrap();

        assert!(tokenizer.increment_token().unwrap().is_none());
        assert_eq!(tokenizer.state(), TokenizerState::Done);
        assert_eq!(tokenizer.end(), 0);
    }

    #[test]
    fn test_buffer_size_validation() {
        let result = SegmentingTokenizer::new(
            Utf16Source::from("x"),
            HardBreakBoundaries::new(),
            UnicodeWordHandler::new(),
            config(1, CharacterMode::Codepoint),
        );
        assert!(matches!(result, Err(DecompoundError::InvalidArgument(_))));
    }

    #[test]
    fn test_window_splits_at_last_hard_break() {
        // 6-unit window: "ab\ncd\n" fits exactly, the second line follows
        let tokens = spans("ab\ncd\nef", 6, CharacterMode::Codepoint);
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["ab\n", "cd\n", "ef"]);
        assert_eq!((tokens[2].start_offset, tokens[2].end_offset), (6, 8));
    }

    #[test]
    fn test_coverage_with_small_windows() {
        let text = "first line\nsecond much longer line without breaks\r\nx\n\nlast";
        for buffer_size in [2, 3, 5, 8, 16, 1024] {
            let tokens = spans(text, buffer_size, CharacterMode::Codepoint);

            let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
            assert_eq!(joined, text, "buffer size {buffer_size}");

            let mut expected_start = 0;
            for token in &tokens {
                assert_eq!(token.start_offset, expected_start);
                assert!(token.end_offset > token.start_offset);
                expected_start = token.end_offset;
            }
            assert_eq!(expected_start, text.encode_utf16().count());
        }
    }

    #[test]
    fn test_forced_split_terminates() {
        let text = "x".repeat(100);
        let tokens = spans(&text, 7, CharacterMode::Codepoint);

        // 100 units in 7-unit windows
        assert_eq!(tokens.len(), 15);
        assert!(tokens.iter().all(|t| t.utf16_len() <= 7));
    }

    #[test]
    fn test_forced_split_keeps_surrogate_pairs() {
        let text = "aaa\u{1F980}bbb\u{1F980}\u{1F980}c";
        for buffer_size in [2, 3, 4, 5] {
            let tokens = spans(text, buffer_size, CharacterMode::Codepoint);
            assert!(
                tokens.iter().all(|t| !t.text.contains('\u{FFFD}')),
                "buffer size {buffer_size}"
            );
            let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
            assert_eq!(joined, text);
        }
    }

    #[test]
    fn test_legacy_mode_may_split_pairs() {
        // 4-unit window ends right after the high surrogate
        let tokens = spans("aaa\u{1F980}", 4, CharacterMode::Legacy);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "aaa\u{FFFD}");
        assert_eq!((tokens[1].start_offset, tokens[1].end_offset), (4, 5));
    }

    #[test]
    fn test_offset_corrector_applied() {
        let tokenizer = SegmentingTokenizer::new(
            Utf16Source::from("ab cd"),
            UnicodeSentenceBoundaries::new(),
            UnicodeWordHandler::new(),
            SegmenterConfig::default(),
        )
        .unwrap()
        .with_offset_corrector(Box::new(|offset: usize| offset + 100));

        let tokens: Vec<Token> = tokenizer.map(|t| t.unwrap()).collect();
        assert_eq!((tokens[1].start_offset, tokens[1].end_offset), (103, 105));
    }

    #[test]
    fn test_reset() {
        let mut tokenizer = SegmentingTokenizer::new(
            Utf16Source::from("one two"),
            UnicodeSentenceBoundaries::new(),
            UnicodeWordHandler::new(),
            config(8, CharacterMode::Codepoint),
        )
        .unwrap();
        assert_eq!(tokenizer.by_ref().count(), 2);

        tokenizer.reset(Utf16Source::from("three"));
        assert_eq!(tokenizer.state(), TokenizerState::Unstarted);

        let token = tokenizer.increment_token().unwrap().unwrap();
        assert_eq!(token.text, "three");
        assert_eq!((token.position, token.start_offset), (0, 0));
    }

    struct BrokenSource;

    impl CharSource for BrokenSource {
        fn read(&mut self, _buf: &mut [u16]) -> Result<usize> {
            Err(io::Error::other("disk on fire").into())
        }
    }

    #[test]
    fn test_read_error_ends_stream() {
        let mut tokenizer = SegmentingTokenizer::new(
            BrokenSource,
            HardBreakBoundaries::new(),
            UnicodeWordHandler::new(),
            SegmenterConfig::default(),
        )
        .unwrap();

        assert!(matches!(
            tokenizer.increment_token(),
            Err(DecompoundError::Io(_))
        ));
        assert_eq!(tokenizer.state(), TokenizerState::Done);
        assert!(tokenizer.next().is_none());
    }
}
