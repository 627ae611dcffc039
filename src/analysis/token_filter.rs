//! Token filter implementations for token transformation.
//!
//! Filters transform the token streams produced by tokenizers. They can
//! rewrite tokens, flag them, or add new tokens to the stream.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`keyword_marker::KeywordMarkerFilter`] - Flags protected words
//! - [`compound::DictionaryCompoundWordFilter`] - Adds dictionary subwords of compounds
//!
//! # Examples
//!
//! ```
//! use decompound::analysis::token_filter::Filter;
//! use decompound::analysis::token_filter::lowercase::LowercaseFilter;
//! use decompound::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```
//!
//! # Filter Chaining
//!
//! Filters are chained in an analyzer. Compound splitting usually runs last,
//! after the case has been normalised:
//!
//! ```text
//! Tokenizer → Lowercase → Keyword Marker → Compound Words
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod compound;
pub mod keyword_marker;
pub mod lowercase;

/// Trait for filters that transform token streams.
///
/// Filters receive a stream of tokens and produce a new stream, allowing
/// them to modify, flag, or augment tokens.
///
/// The trait requires `Send + Sync` to allow use in concurrent contexts.
///
/// # Examples
///
/// Implementing a custom filter:
///
/// ```
/// use decompound::analysis::token::{Token, TokenStream};
/// use decompound::analysis::token_filter::Filter;
/// use decompound::error::Result;
///
/// struct ReverseFilter;
///
/// impl Filter for ReverseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         let reversed: Vec<Token> = tokens
///             .map(|mut t| {
///                 t.text = t.text.chars().rev().collect();
///                 t
///             })
///             .collect();
///         Ok(Box::new(reversed.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}
