//! Example demonstrating dictionary-based compound word splitting.

use std::sync::Arc;

use decompound::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use decompound::analysis::dictionary::{CompoundDictionary, WordDictionary};
use decompound::analysis::token::TokenType;
use decompound::analysis::token_filter::compound::{
    DecompounderConfig, DictionaryCompoundWordFilter, DictionaryDecomposer,
};
use decompound::analysis::token_filter::keyword_marker::KeywordMarkerFilter;
use decompound::analysis::token_filter::lowercase::LowercaseFilter;
use decompound::analysis::tokenizer::SentenceWordTokenizer;
use decompound::error::Result;

fn main() -> Result<()> {
    println!("=== Compound Word Examples ===\n");

    let dictionary: Arc<dyn WordDictionary> = Arc::new(CompoundDictionary::from_words([
        "donau", "dampf", "schiff", "fahrt", "kapitän", "see", "segel", "boot", "haus",
    ]));

    // Example 1: every dictionary word found inside a compound
    println!("1. All matches:");
    let analyzer = build_analyzer(Arc::clone(&dictionary), DecompounderConfig::default())?;
    demonstrate(&analyzer, "Der Donaudampfschifffahrtskapitän fährt Segelboot.")?;

    // Example 2: only the longest match at each start position
    println!("\n2. Only the longest match:");
    let analyzer = build_analyzer(
        Arc::clone(&dictionary),
        DecompounderConfig {
            only_longest_match: true,
            ..DecompounderConfig::default()
        },
    )?;
    demonstrate(&analyzer, "Ein Seehaus und ein Bootshaus.")?;

    // Example 3: keywords pass through without being split
    println!("\n3. Keywords are kept whole:");
    let decomposer = DictionaryDecomposer::new(dictionary, DecompounderConfig::default())?;
    let analyzer = PipelineAnalyzer::new(Arc::new(SentenceWordTokenizer::new()))
        .add_filter(Arc::new(LowercaseFilter::new()))
        .add_filter(Arc::new(KeywordMarkerFilter::new(["segelboot"])))
        .add_filter(Arc::new(DictionaryCompoundWordFilter::new(decomposer)));
    demonstrate(&analyzer, "Segelboot und Dampfschiff.")?;

    Ok(())
}

fn build_analyzer(
    dictionary: Arc<dyn WordDictionary>,
    config: DecompounderConfig,
) -> Result<PipelineAnalyzer> {
    let decomposer = DictionaryDecomposer::new(dictionary, config)?;
    Ok(PipelineAnalyzer::new(Arc::new(SentenceWordTokenizer::new()))
        .add_filter(Arc::new(LowercaseFilter::new()))
        .add_filter(Arc::new(DictionaryCompoundWordFilter::new(decomposer))))
}

fn demonstrate(analyzer: &PipelineAnalyzer, text: &str) -> Result<()> {
    println!("   Input: \"{text}\"");
    for token in analyzer.analyze(text)? {
        let indent = if token.token_type == TokenType::Subword {
            "      +"
        } else {
            "    "
        };
        println!(
            "{indent}'{}' [{}..{}] pos {}",
            token.text, token.start_offset, token.end_offset, token.position
        );
    }
    Ok(())
}
