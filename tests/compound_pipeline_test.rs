//! Integration tests for the tokenize → lowercase → decompose pipeline.

use std::io::BufReader;
use std::sync::Arc;

use decompound::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use decompound::analysis::char_source::ReaderSource;
use decompound::analysis::dictionary::{CompoundDictionary, WordDictionary};
use decompound::analysis::sentence::UnicodeSentenceBoundaries;
use decompound::analysis::token::{Token, TokenStream, TokenType};
use decompound::analysis::token_filter::Filter;
use decompound::analysis::token_filter::compound::{
    DecompounderConfig, DictionaryCompoundWordFilter, DictionaryDecomposer,
};
use decompound::analysis::token_filter::lowercase::LowercaseFilter;
use decompound::analysis::tokenizer::{
    SegmenterConfig, SegmentingTokenizer, SentenceWordTokenizer, Tokenizer, UnicodeWordHandler,
};
use decompound::error::Result;

const TEXT: &str = "Der Donaudampfschifffahrtskapitän fährt. Schnell!";

fn german_dictionary() -> Arc<dyn WordDictionary> {
    Arc::new(CompoundDictionary::from_words([
        "donau", "dampf", "schiff", "fahrt",
    ]))
}

fn longest_match_config() -> DecompounderConfig {
    DecompounderConfig {
        min_subword_size: 3,
        max_subword_size: 20,
        only_longest_match: true,
        ..DecompounderConfig::default()
    }
}

fn summary(tokens: &[Token]) -> Vec<(&str, usize, usize)> {
    tokens
        .iter()
        .map(|t| (t.text.as_str(), t.start_offset, t.end_offset))
        .collect()
}

#[test]
fn test_german_compound_end_to_end() -> Result<()> {
    let decomposer = DictionaryDecomposer::new(german_dictionary(), longest_match_config())?;
    let analyzer = PipelineAnalyzer::new(Arc::new(SentenceWordTokenizer::new()))
        .add_filter(Arc::new(LowercaseFilter::new()))
        .add_filter(Arc::new(DictionaryCompoundWordFilter::new(decomposer)));

    let tokens: Vec<Token> = analyzer.analyze(TEXT)?.collect();

    assert_eq!(
        summary(&tokens),
        vec![
            ("der", 0, 3),
            ("donaudampfschifffahrtskapitän", 4, 33),
            ("donau", 4, 9),
            ("dampf", 9, 14),
            ("schiff", 14, 20),
            ("fahrt", 20, 25),
            ("fährt", 34, 39),
            ("schnell", 41, 48),
        ]
    );

    let subwords: Vec<&Token> = tokens
        .iter()
        .filter(|t| t.token_type == TokenType::Subword)
        .collect();
    assert_eq!(subwords.len(), 4);
    assert!(subwords.iter().all(|t| t.position_increment == 0 && t.position == 1));

    Ok(())
}

#[test]
fn test_subword_offsets_index_original_text() -> Result<()> {
    let decomposer = DictionaryDecomposer::new(german_dictionary(), longest_match_config())?;
    let filter = DictionaryCompoundWordFilter::new(decomposer);
    let units: Vec<u16> = TEXT.encode_utf16().collect();

    let words = LowercaseFilter::new().filter(SentenceWordTokenizer::new().tokenize(TEXT)?)?;
    for token in filter.filter(words)? {
        let original = String::from_utf16_lossy(&units[token.start_offset..token.end_offset]);
        assert_eq!(original.to_lowercase(), token.text);
    }

    Ok(())
}

#[test]
fn test_all_matches_policy() -> Result<()> {
    let dictionary: Arc<dyn WordDictionary> =
        Arc::new(CompoundDictionary::from_words(["do", "dog", "dogs"]));
    let config = DecompounderConfig {
        min_word_size: 4,
        min_subword_size: 2,
        max_subword_size: 4,
        only_longest_match: false,
    };
    let filter = DictionaryCompoundWordFilter::new(DictionaryDecomposer::new(
        Arc::clone(&dictionary),
        config,
    )?);

    let tokens: TokenStream = Box::new(vec![Token::with_offsets("dogs", 0, 0, 4)].into_iter());
    let result: Vec<Token> = filter.filter(tokens)?.collect();
    assert_eq!(
        summary(&result),
        vec![("dogs", 0, 4), ("do", 0, 2), ("dog", 0, 3), ("dogs", 0, 4)]
    );

    let longest = DictionaryCompoundWordFilter::new(DictionaryDecomposer::new(
        dictionary,
        DecompounderConfig {
            only_longest_match: true,
            ..config
        },
    )?);
    let tokens: TokenStream = Box::new(vec![Token::with_offsets("dogs", 0, 0, 4)].into_iter());
    let result: Vec<Token> = longest.filter(tokens)?.collect();
    assert_eq!(summary(&result), vec![("dogs", 0, 4), ("dogs", 0, 4)]);

    Ok(())
}

#[test]
fn test_shared_decomposer_across_threads() -> Result<()> {
    let decomposer = Arc::new(DictionaryDecomposer::new(
        german_dictionary(),
        longest_match_config(),
    )?);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let decomposer = Arc::clone(&decomposer);
            std::thread::spawn(move || {
                decomposer
                    .decompose("donaudampfschifffahrt")
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        let parts = handle.join().expect("decomposer thread panicked");
        assert_eq!(parts, vec!["donau", "dampf", "schiff", "fahrt"]);
    }

    Ok(())
}

#[test]
fn test_streaming_reader_pipeline() -> Result<()> {
    // a tiny read buffer splits multi-byte UTF-8 sequences between reads
    let reader = BufReader::with_capacity(3, TEXT.as_bytes());
    let tokenizer = SegmentingTokenizer::new(
        ReaderSource::new(reader),
        UnicodeSentenceBoundaries::new(),
        UnicodeWordHandler::new(),
        SegmenterConfig {
            buffer_size: 16,
            ..SegmenterConfig::default()
        },
    )?;
    let words: Vec<Token> = tokenizer.collect::<Result<Vec<_>>>()?;

    let decomposer = DictionaryDecomposer::new(german_dictionary(), longest_match_config())?;
    let lowercase = LowercaseFilter::new();
    let compound = DictionaryCompoundWordFilter::new(decomposer);
    let tokens: Vec<Token> = compound
        .filter(lowercase.filter(Box::new(words.into_iter()))?)?
        .collect();

    // the 16-unit window cuts the compound; no part of the input is lost
    let joined: String = tokens
        .iter()
        .filter(|t| t.token_type != TokenType::Subword)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(joined, "derdonaudampfschifffahrtskapitänfährtschnell");

    Ok(())
}
