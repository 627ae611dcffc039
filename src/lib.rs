//! # Decompound
//!
//! Streaming text analysis with dictionary-based compound word splitting.
//!
//! ## Features
//!
//! - Bounded-memory tokenization of arbitrarily long character streams
//! - Sentence-then-word segmentation following Unicode rules
//! - Surrogate-pair safe buffering with a legacy compatibility mode
//! - Brute-force dictionary decomposition of compounds ("Donaudampfschiff")
//! - Offsets in UTF-16 units, corrected through char filter edits

pub mod analysis;
pub mod cli;
pub mod error;

pub mod prelude {
    pub use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
    pub use crate::analysis::char_source::{CharSource, ReaderSource, Utf16Source};
    pub use crate::analysis::character::CharacterMode;
    pub use crate::analysis::config::AnalysisConfig;
    pub use crate::analysis::dictionary::{CompoundDictionary, WordDictionary};
    pub use crate::analysis::token::{Token, TokenType};
    pub use crate::analysis::token_filter::Filter;
    pub use crate::analysis::token_filter::compound::{
        DecompounderConfig, DictionaryCompoundWordFilter, DictionaryDecomposer,
    };
    pub use crate::analysis::tokenizer::{SegmenterConfig, SegmentingTokenizer, Tokenizer};
    pub use crate::error::{DecompoundError, Result};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
