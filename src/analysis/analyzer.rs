//! Analyzers combine char filters, a tokenizer and token filters.
//!
//! [`pipeline::PipelineAnalyzer`] is the general building block. The
//! [`AnalysisConfig`](crate::analysis::config::AnalysisConfig) can assemble
//! the usual compound-splitting pipeline from a configuration file.

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod pipeline;

pub use pipeline::{AnalyzedStream, PipelineAnalyzer};

/// Trait for analyzers that convert text into processed tokens.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &str;
}
