//! Lowercase filter implementation.
//!
//! Case folding runs over the UTF-16 form of each token through
//! [`CharacterMode::to_lower_case`], so the unit length of a token never
//! changes and its offsets stay valid. In [`CharacterMode::Legacy`]
//! characters outside the basic multilingual plane are left unchanged.
//!
//! # Examples
//!
//! ```
//! use decompound::analysis::token_filter::Filter;
//! use decompound::analysis::token_filter::lowercase::LowercaseFilter;
//! use decompound::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Donaudampfschiff", 0), Token::new("FÄHRT", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "donaudampfschiff");
//! assert_eq!(filtered[1].text, "fährt");
//! ```

use crate::analysis::character::CharacterMode;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that converts tokens to lowercase.
///
/// ASCII tokens take a fast path; everything else is folded codepoint by
/// codepoint according to the configured [`CharacterMode`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LowercaseFilter {
    mode: CharacterMode,
}

impl LowercaseFilter {
    /// Create a codepoint-aware lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter::default()
    }

    pub fn with_mode(mode: CharacterMode) -> Self {
        LowercaseFilter { mode }
    }

    pub fn mode(&self) -> CharacterMode {
        self.mode
    }

    /// Lowercase a single string.
    pub fn lowercase(&self, text: &str) -> Result<String> {
        if text.is_ascii() {
            return Ok(text.to_ascii_lowercase());
        }
        let mut units: Vec<u16> = text.encode_utf16().collect();
        let limit = units.len();
        self.mode.to_lower_case(&mut units, 0, limit)?;
        Ok(String::from_utf16_lossy(&units))
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                let text = self.lowercase(&token.text)?;
                Ok(token.with_text(text))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_lowercase_filter() {
        let filter = LowercaseFilter::new();
        let tokens = vec![
            Token::with_offsets("Hello", 0, 0, 5),
            Token::new("WORLD", 1),
            Token::new("Kapitän", 2).mark_keyword(),
        ];
        let token_stream = Box::new(tokens.into_iter());

        let result: Vec<Token> = filter.filter(token_stream).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "hello");
        assert_eq!((result[0].start_offset, result[0].end_offset), (0, 5));
        assert_eq!(result[1].text, "world");
        assert_eq!(result[2].text, "kapitän");
        assert!(result[2].is_keyword());
    }

    #[test]
    fn test_supplementary_by_mode() {
        // U+10400 DESERET CAPITAL LONG I lowercases to U+10428
        let codepoint = LowercaseFilter::new();
        assert_eq!(codepoint.lowercase("\u{10400}X").unwrap(), "\u{10428}x");

        let legacy = LowercaseFilter::with_mode(CharacterMode::Legacy);
        assert_eq!(legacy.lowercase("\u{10400}X").unwrap(), "\u{10400}x");
    }

    #[test]
    fn test_width_changing_mapping_skipped() {
        // U+0130 lowercases to two codepoints; it is left alone
        let filter = LowercaseFilter::new();
        assert_eq!(filter.lowercase("\u{130}STANBUL").unwrap(), "\u{130}stanbul");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LowercaseFilter::new().name(), "lowercase");
    }
}
