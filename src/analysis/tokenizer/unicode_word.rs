//! Unicode word handler for the segmenting tokenizer.

use unicode_segmentation::UnicodeSegmentation;

use super::segmenting::{SentenceHandler, WordSpan};
use crate::analysis::token::TokenType;

/// Splits each sentence into words following the Unicode word boundary
/// rules (UAX #29).
///
/// Segments without any alphanumeric character (spaces, punctuation) are
/// skipped. Every word's type is detected from its characters.
#[derive(Clone, Debug, Default)]
pub struct UnicodeWordHandler {
    words: Vec<WordSpan>,
    next: usize,
    scratch: String,
}

impl UnicodeWordHandler {
    pub fn new() -> Self {
        UnicodeWordHandler::default()
    }
}

impl SentenceHandler for UnicodeWordHandler {
    fn set_next_sentence(&mut self, text: &[u16], sentence_start: usize, sentence_end: usize) {
        self.words.clear();
        self.next = 0;
        self.scratch.clear();
        // lone surrogates become U+FFFD, one unit each, so positions stay aligned
        self.scratch.extend(
            char::decode_utf16(text[sentence_start..sentence_end].iter().copied())
                .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
        );

        let mut position = sentence_start;
        for segment in self.scratch.split_word_bounds() {
            let len = segment.encode_utf16().count();
            if segment.chars().any(|c| c.is_alphanumeric()) {
                self.words.push(WordSpan::new(
                    position,
                    position + len,
                    TokenType::detect(segment),
                ));
            }
            position += len;
        }
    }

    fn increment_word(&mut self, _text: &[u16]) -> Option<WordSpan> {
        let word = self.words.get(self.next).copied()?;
        self.next += 1;
        Some(word)
    }

    fn reset(&mut self) {
        self.words.clear();
        self.next = 0;
    }
}
