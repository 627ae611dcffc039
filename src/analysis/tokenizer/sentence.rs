//! Whole-sentence handler for the segmenting tokenizer.

use super::segmenting::{SentenceHandler, WordSpan};
use crate::analysis::token::TokenType;

fn is_whitespace_unit(unit: u16) -> bool {
    char::from_u32(u32::from(unit)).is_some_and(char::is_whitespace)
}

/// Emits each sentence as a single token.
///
/// By default surrounding whitespace is trimmed and blank sentences are
/// dropped. [`untrimmed`](Self::untrimmed) emits exact sentence spans, whose
/// concatenation reproduces the input.
#[derive(Clone, Debug)]
pub struct WholeSentenceHandler {
    trim: bool,
    pending: Option<WordSpan>,
}

impl WholeSentenceHandler {
    pub fn new() -> Self {
        WholeSentenceHandler {
            trim: true,
            pending: None,
        }
    }

    pub fn untrimmed() -> Self {
        WholeSentenceHandler {
            trim: false,
            pending: None,
        }
    }
}

impl Default for WholeSentenceHandler {
    fn default() -> Self {
        WholeSentenceHandler::new()
    }
}

impl SentenceHandler for WholeSentenceHandler {
    fn set_next_sentence(&mut self, text: &[u16], sentence_start: usize, sentence_end: usize) {
        let (mut start, mut end) = (sentence_start, sentence_end);
        if self.trim {
            while start < end && is_whitespace_unit(text[start]) {
                start += 1;
            }
            while end > start && is_whitespace_unit(text[end - 1]) {
                end -= 1;
            }
        }
        self.pending = (start < end).then(|| WordSpan::new(start, end, TokenType::Sentence));
    }

    fn increment_word(&mut self, _text: &[u16]) -> Option<WordSpan> {
        self.pending.take()
    }

    fn reset(&mut self) {
        self.pending = None;
    }
}
