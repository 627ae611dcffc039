//! Pipeline analyzer that combines tokenizers and filters.
//!
//! The PipelineAnalyzer applies processing in this order:
//! 1. Char Filters: Normalizes raw text
//! 2. Tokenizer: Splits text into tokens; offsets are mapped back to the raw
//!    text through a [`TransformationCorrector`]
//! 3. Token Filters: Applied sequentially in the order they were added
//!
//! [`PipelineAnalyzer::analyze_source`] runs the same pipeline over a
//! [`CharSource`]. Without char filters the source is read window by window
//! as tokens are pulled, so memory stays bounded by the tokenizer window and
//! the filters' pending queues.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use decompound::analysis::analyzer::{Analyzer, PipelineAnalyzer};
//! use decompound::analysis::dictionary::CompoundDictionary;
//! use decompound::analysis::token_filter::compound::{
//!     DecompounderConfig, DictionaryCompoundWordFilter, DictionaryDecomposer,
//! };
//! use decompound::analysis::token_filter::lowercase::LowercaseFilter;
//! use decompound::analysis::tokenizer::SentenceWordTokenizer;
//!
//! let dictionary = CompoundDictionary::from_words(["dampf", "schiff"]);
//! let decomposer =
//!     DictionaryDecomposer::new(Arc::new(dictionary), DecompounderConfig::default()).unwrap();
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(SentenceWordTokenizer::new()))
//!     .add_filter(Arc::new(LowercaseFilter::new()))
//!     .add_filter(Arc::new(DictionaryCompoundWordFilter::new(decomposer)))
//!     .with_name("german");
//!
//! let tokens: Vec<_> = analyzer.analyze("Das Dampfschiff").unwrap().collect();
//! let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["das", "dampfschiff", "dampf", "schiff"]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use log::debug;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_source::{CharSource, read_to_string};
use crate::analysis::offset::TransformationCorrector;
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{DecompoundError, Result};

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    char_filters: Vec<Arc<dyn CharFilter>>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            char_filters: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Add a char filter to the pipeline.
    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    pub fn char_filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.char_filters
    }

    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// Analyze a character stream lazily.
    ///
    /// Char filters rewrite the whole text, so when any are configured the
    /// source is read into memory first.
    pub fn analyze_source(&self, mut source: Box<dyn CharSource>) -> Result<AnalyzedStream> {
        let error = Rc::new(RefCell::new(None));

        let tokens: TokenStream = if self.char_filters.is_empty() {
            let slot = Rc::clone(&error);
            let words = self.tokenizer.tokenize_source(source)?;
            Box::new(words.map_while(move |result| match result {
                Ok(token) => Some(token),
                Err(e) => {
                    *slot.borrow_mut() = Some(e);
                    None
                }
            }))
        } else {
            debug!("{}: char filters need the whole input in memory", self.name);
            let text = read_to_string(&mut source)?;
            self.tokenize_text(&text)?
        };

        Ok(AnalyzedStream {
            tokens: self.apply_filters(tokens)?,
            error,
        })
    }

    /// Run the char filters and the tokenizer over `text`.
    fn tokenize_text(&self, text: &str) -> Result<TokenStream> {
        if self.char_filters.is_empty() {
            return self.tokenizer.tokenize(text);
        }

        let mut filtered_text = text.to_string();
        let mut corrector = TransformationCorrector::new();
        for char_filter in &self.char_filters {
            let (new_text, transformations) = char_filter.filter(&filtered_text);
            filtered_text = new_text;
            corrector.push_stage(transformations);
        }
        self.tokenizer
            .tokenize_corrected(&filtered_text, Box::new(corrector))
    }

    fn apply_filters(&self, mut tokens: TokenStream) -> Result<TokenStream> {
        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }
        Ok(tokens)
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let tokens = self.tokenize_text(text)?;
        self.apply_filters(tokens)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Tokens of a streamed analysis.
///
/// A read failure ends the stream: it is yielded once, after every token
/// produced from the input before it.
pub struct AnalyzedStream {
    tokens: TokenStream,
    error: Rc<RefCell<Option<DecompoundError>>>,
}

impl Iterator for AnalyzedStream {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        match self.tokens.next() {
            Some(token) => Some(Ok(token)),
            None => self.error.borrow_mut().take().map(Err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::{BufReader, Cursor};

    use super::*;
    use crate::analysis::char_filter::mapping::MappingCharFilter;
    use crate::analysis::char_source::{ReaderSource, Utf16Source};
    use crate::analysis::dictionary::CompoundDictionary;
    use crate::analysis::token_filter::compound::{
        DecompounderConfig, DictionaryCompoundWordFilter, DictionaryDecomposer,
    };
    use crate::analysis::tokenizer::SegmenterConfig;
    use crate::analysis::token::Token;
    use crate::analysis::token_filter::keyword_marker::KeywordMarkerFilter;
    use crate::analysis::token_filter::lowercase::LowercaseFilter;
    use crate::analysis::tokenizer::SentenceWordTokenizer;

    #[test]
    fn test_pipeline_filters_in_order() {
        let analyzer = PipelineAnalyzer::new(Arc::new(SentenceWordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(KeywordMarkerFilter::new(["bundestag"])));

        let tokens: Vec<Token> = analyzer.analyze("Der Bundestag tagt.").unwrap().collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].text, "bundestag");
        assert!(tokens[1].is_keyword());
        assert_eq!(analyzer.name(), "pipeline_sentence_word");
    }

    #[test]
    fn test_char_filter_offsets_corrected() {
        let mut mapping = HashMap::new();
        mapping.insert("ß".to_string(), "ss".to_string());
        let analyzer = PipelineAnalyzer::new(Arc::new(SentenceWordTokenizer::new()))
            .add_char_filter(Arc::new(MappingCharFilter::new(mapping).unwrap()))
            .with_name("normalising");

        let tokens: Vec<Token> = analyzer.analyze("Große Straße").unwrap().collect();

        assert_eq!(tokens[0].text, "Grosse");
        assert_eq!((tokens[0].start_offset, tokens[0].end_offset), (0, 5));
        assert_eq!(tokens[1].text, "Strasse");
        assert_eq!((tokens[1].start_offset, tokens[1].end_offset), (6, 12));
        assert_eq!(analyzer.name(), "normalising");
        assert_eq!(analyzer.char_filters().len(), 1);
    }

    fn small_window_analyzer() -> PipelineAnalyzer {
        let dictionary = CompoundDictionary::from_words(["dampf", "schiff"]);
        let decomposer =
            DictionaryDecomposer::new(Arc::new(dictionary), DecompounderConfig::default())
                .unwrap();
        let tokenizer = SentenceWordTokenizer::with_config(SegmenterConfig {
            buffer_size: 32,
            ..SegmenterConfig::default()
        });
        PipelineAnalyzer::new(Arc::new(tokenizer))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(DictionaryCompoundWordFilter::new(decomposer)))
    }

    #[test]
    fn test_analyze_source_matches_analyze() {
        let text = "Das Dampfschiff fährt.\nDer Dampf steigt.\n".repeat(20);
        let analyzer = small_window_analyzer();

        let expected: Vec<Token> = analyzer.analyze(&text).unwrap().collect();
        let streamed: Vec<Token> = analyzer
            .analyze_source(Box::new(Utf16Source::from(text.as_str())))
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(streamed, expected);
        // "dampf" is in the dictionary and matches itself
        assert_eq!(streamed.len(), 20 * 9);
    }

    #[test]
    fn test_analyze_source_with_char_filter() {
        let mut mapping = HashMap::new();
        mapping.insert("ß".to_string(), "ss".to_string());
        let analyzer = PipelineAnalyzer::new(Arc::new(SentenceWordTokenizer::new()))
            .add_char_filter(Arc::new(MappingCharFilter::new(mapping).unwrap()));

        let tokens: Vec<Token> = analyzer
            .analyze_source(Box::new(Utf16Source::from("Große Straße")))
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(tokens[1].text, "Strasse");
        assert_eq!((tokens[1].start_offset, tokens[1].end_offset), (6, 12));
    }

    #[test]
    fn test_analyze_source_read_error_comes_last() {
        let mut bytes = "Das Dampfschiff fährt.\n".repeat(10).into_bytes();
        bytes.push(0xFF);
        let source = ReaderSource::new(BufReader::with_capacity(8, Cursor::new(bytes)));

        let results: Vec<Result<Token>> = small_window_analyzer()
            .analyze_source(Box::new(source))
            .unwrap()
            .collect();

        assert!(results.len() > 1);
        assert!(results[..results.len() - 1].iter().all(|r| r.is_ok()));
        assert!(matches!(results.last(), Some(Err(DecompoundError::Io(_)))));
    }
}
