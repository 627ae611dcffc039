//! Text analysis module.
//!
//! This module turns raw character streams into word tokens and splits
//! compound words into the dictionary words they are made of.
//!
//! Data flows through these layers:
//!
//! ```text
//! CharSource → CharacterBuffer → SegmentingTokenizer (sentences → words)
//!            → token filters (lowercase, keywords) → DictionaryCompoundWordFilter
//! ```

pub mod analyzer;
pub mod char_filter;
pub mod char_source;
pub mod character;
pub mod config;
pub mod dictionary;
pub mod offset;
pub mod sentence;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
