//! Sentence boundary detection over a window of UTF-16 units.
//!
//! A [`SentenceBoundaries`] implementation is given a window of text with
//! [`set_text`](SentenceBoundaries::set_text) and then walked like a cursor:
//! [`current`](SentenceBoundaries::current) returns the boundary the cursor
//! sits on and [`next_boundary`](SentenceBoundaries::next_boundary) advances
//! it. `None` from either is the terminal "done" value.
//!
//! Detectors carry cursor state, so every tokenizer owns its own instance.
//!
//! # Examples
//!
//! ```
//! use decompound::analysis::sentence::{SentenceBoundaries, UnicodeSentenceBoundaries};
//!
//! let text: Vec<u16> = "One. Two!".encode_utf16().collect();
//! let mut boundaries = UnicodeSentenceBoundaries::new();
//! boundaries.set_text(&text);
//!
//! assert_eq!(boundaries.current(), Some(0));
//! assert_eq!(boundaries.next_boundary(), Some(5));
//! assert_eq!(boundaries.next_boundary(), Some(9));
//! assert_eq!(boundaries.next_boundary(), None);
//! ```

use unicode_segmentation::UnicodeSegmentation;

/// Whether `unit` is an unambiguous line or paragraph break.
///
/// Carriage return, line feed, NEL, line separator and paragraph separator
/// always end a sentence, whatever follows them.
#[inline]
pub fn is_hard_break(unit: u16) -> bool {
    matches!(unit, 0x000D | 0x000A | 0x0085 | 0x2028 | 0x2029)
}

/// A cursor over sentence boundaries of the current text window.
pub trait SentenceBoundaries {
    /// Re-anchor the detector to `text` and move the cursor to its start.
    fn set_text(&mut self, text: &[u16]);

    /// The boundary the cursor is on, or `None` when there is none.
    fn current(&self) -> Option<usize>;

    /// Advance to the next boundary, or return `None` at the end of the text.
    fn next_boundary(&mut self) -> Option<usize>;
}

impl<B: SentenceBoundaries + ?Sized> SentenceBoundaries for Box<B> {
    fn set_text(&mut self, text: &[u16]) {
        (**self).set_text(text)
    }

    fn current(&self) -> Option<usize> {
        (**self).current()
    }

    fn next_boundary(&mut self) -> Option<usize> {
        (**self).next_boundary()
    }
}

/// Precomputed boundary positions plus a cursor.
#[derive(Clone, Debug, Default)]
struct BoundaryCursor {
    boundaries: Vec<usize>,
    cursor: usize,
}

impl BoundaryCursor {
    fn reset(&mut self) {
        self.boundaries.clear();
        self.cursor = 0;
    }

    fn current(&self) -> Option<usize> {
        self.boundaries.get(self.cursor).copied()
    }

    fn next(&mut self) -> Option<usize> {
        if self.cursor + 1 < self.boundaries.len() {
            self.cursor += 1;
            Some(self.boundaries[self.cursor])
        } else {
            None
        }
    }
}

/// Sentence boundaries following the Unicode text segmentation rules (UAX #29).
///
/// Lone surrogates in the window are treated as U+FFFD, which keeps every
/// position aligned with the window's units.
#[derive(Clone, Debug, Default)]
pub struct UnicodeSentenceBoundaries {
    cursor: BoundaryCursor,
    scratch: String,
}

impl UnicodeSentenceBoundaries {
    /// Create a detector with an empty window.
    pub fn new() -> Self {
        UnicodeSentenceBoundaries::default()
    }
}

impl SentenceBoundaries for UnicodeSentenceBoundaries {
    fn set_text(&mut self, text: &[u16]) {
        self.cursor.reset();
        self.scratch.clear();
        self.scratch.extend(
            char::decode_utf16(text.iter().copied())
                .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
        );

        let mut position = 0;
        self.cursor.boundaries.push(position);
        for sentence in self.scratch.split_sentence_bounds() {
            position += sentence.encode_utf16().count();
            self.cursor.boundaries.push(position);
        }
    }

    fn current(&self) -> Option<usize> {
        self.cursor.current()
    }

    fn next_boundary(&mut self) -> Option<usize> {
        self.cursor.next()
    }
}

/// Sentence boundaries placed after every hard line break.
///
/// Cheap and deterministic; suited to line-oriented input such as word
/// lists or log files.
#[derive(Clone, Debug, Default)]
pub struct HardBreakBoundaries {
    cursor: BoundaryCursor,
}

impl HardBreakBoundaries {
    /// Create a detector with an empty window.
    pub fn new() -> Self {
        HardBreakBoundaries::default()
    }
}

impl SentenceBoundaries for HardBreakBoundaries {
    fn set_text(&mut self, text: &[u16]) {
        self.cursor.reset();
        self.cursor.boundaries.push(0);
        for (i, &unit) in text.iter().enumerate() {
            if is_hard_break(unit) && i + 1 < text.len() {
                self.cursor.boundaries.push(i + 1);
            }
        }
        if !text.is_empty() {
            self.cursor.boundaries.push(text.len());
        }
    }

    fn current(&self) -> Option<usize> {
        self.cursor.current()
    }

    fn next_boundary(&mut self) -> Option<usize> {
        self.cursor.next()
    }
}
