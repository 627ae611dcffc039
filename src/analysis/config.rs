//! Analysis configuration.
//!
//! [`AnalysisConfig`] describes a complete compound-splitting pipeline and
//! can be read from JSON. Every field is optional:
//!
//! ```json
//! {
//!   "mode": "codepoint",
//!   "buffer_size": 4096,
//!   "lowercase": true,
//!   "keywords": ["Bundestag"],
//!   "char_mappings": { "ß": "ss" },
//!   "dictionary": "german.txt",
//!   "decompounder": { "min_subword_size": 3, "only_longest_match": true }
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::PipelineAnalyzer;
use crate::analysis::char_filter::mapping::MappingCharFilter;
use crate::analysis::character::{CharacterMode, MIN_BUFFER_SIZE};
use crate::analysis::dictionary::{CompoundDictionary, WordDictionary};
use crate::analysis::token_filter::compound::{
    DecompounderConfig, DictionaryCompoundWordFilter, DictionaryDecomposer,
};
use crate::analysis::token_filter::keyword_marker::KeywordMarkerFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::{
    DEFAULT_BUFFER_SIZE, SegmenterConfig, SentenceTokenizer, SentenceWordTokenizer,
};
use crate::error::{DecompoundError, Result};

/// Settings of a compound-splitting analysis pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub mode: CharacterMode,
    pub buffer_size: usize,
    /// Lowercase tokens before decomposition.
    pub lowercase: bool,
    /// Words that are never decomposed.
    pub keywords: Vec<String>,
    /// Fixed-string replacements applied to the raw text.
    pub char_mappings: HashMap<String, String>,
    /// Dictionary file; relative paths resolve against the config file.
    pub dictionary: Option<PathBuf>,
    pub decompounder: DecompounderConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            mode: CharacterMode::Codepoint,
            buffer_size: DEFAULT_BUFFER_SIZE,
            lowercase: true,
            keywords: Vec::new(),
            char_mappings: HashMap::new(),
            dictionary: None,
            decompounder: DecompounderConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DecompoundError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let mut config = Self::from_json(&content).map_err(|e| {
            DecompoundError::config(format!(
                "Invalid config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        if let (Some(dictionary), Some(dir)) = (config.dictionary.as_mut(), path.parent()) {
            if dictionary.is_relative() {
                *dictionary = dir.join(&*dictionary);
            }
        }
        Ok(config)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.buffer_size < MIN_BUFFER_SIZE {
            return Err(DecompoundError::invalid_argument(format!(
                "buffer_size must be >= {MIN_BUFFER_SIZE}, got {}",
                self.buffer_size
            )));
        }
        self.decompounder.validate()
    }

    pub fn segmenter(&self) -> SegmenterConfig {
        SegmenterConfig {
            buffer_size: self.buffer_size,
            mode: self.mode,
        }
    }

    /// Load the configured dictionary file, if any.
    pub fn load_dictionary(&self) -> Result<Option<CompoundDictionary>> {
        self.dictionary
            .as_ref()
            .map(CompoundDictionary::load_from_file)
            .transpose()
    }

    /// Build the word analyzer.
    ///
    /// The compound filter is added only when a dictionary is given, either
    /// directly or through the `dictionary` setting.
    pub fn build_analyzer(
        &self,
        dictionary: Option<Arc<dyn WordDictionary>>,
    ) -> Result<PipelineAnalyzer> {
        let dictionary = match dictionary {
            Some(dictionary) => Some(dictionary),
            None => self
                .load_dictionary()?
                .map(|d| Arc::new(d) as Arc<dyn WordDictionary>),
        };

        let mut analyzer = PipelineAnalyzer::new(Arc::new(SentenceWordTokenizer::with_config(
            self.segmenter(),
        )));
        analyzer = self.add_char_filters(analyzer)?;

        if self.lowercase {
            analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::with_mode(self.mode)));
        }
        if !self.keywords.is_empty() {
            let mut marker = KeywordMarkerFilter::new(self.keywords.iter().cloned());
            if self.lowercase {
                marker = marker.ignore_case();
            }
            analyzer = analyzer.add_filter(Arc::new(marker));
        }
        if let Some(dictionary) = dictionary {
            let decomposer = DictionaryDecomposer::new(dictionary, self.decompounder)?;
            analyzer = analyzer.add_filter(Arc::new(DictionaryCompoundWordFilter::new(decomposer)));
        }

        Ok(analyzer.with_name("compound"))
    }

    /// Build the sentence analyzer.
    pub fn build_sentence_analyzer(&self) -> Result<PipelineAnalyzer> {
        let analyzer =
            PipelineAnalyzer::new(Arc::new(SentenceTokenizer::with_config(self.segmenter())));
        Ok(self.add_char_filters(analyzer)?.with_name("sentences"))
    }

    fn add_char_filters(&self, analyzer: PipelineAnalyzer) -> Result<PipelineAnalyzer> {
        if self.char_mappings.is_empty() {
            return Ok(analyzer);
        }
        let filter = MappingCharFilter::new(self.char_mappings.clone())?;
        Ok(analyzer.add_char_filter(Arc::new(filter)))
    }
}
