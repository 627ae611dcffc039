//! Integration tests for bounded-memory streaming tokenization.

use std::io::Cursor;

use decompound::analysis::char_source::{ReaderSource, Utf16Source};
use decompound::analysis::character::{CharacterBuffer, CharacterMode};
use decompound::analysis::sentence::{HardBreakBoundaries, UnicodeSentenceBoundaries};
use decompound::analysis::token::Token;
use decompound::analysis::tokenizer::{
    SegmenterConfig, SegmentingTokenizer, TokenizerState, UnicodeWordHandler,
    WholeSentenceHandler,
};
use decompound::error::{DecompoundError, Result};

/// Lines of mixed scripts, each well below 40 units.
fn sample_text(lines: usize) -> String {
    let words = ["Schiff", "\u{1F980}krabbe", "東京", "naïve", "𝒳𝒴", "fährt"];
    let mut text = String::new();
    for i in 0..lines {
        for j in 0..3 {
            text.push_str(words[(i + j) % words.len()]);
            text.push(' ');
        }
        text.push_str(if i % 2 == 0 { "ende.\n" } else { "ende!\r\n" });
    }
    text
}

fn word_tokens(text: &str, buffer_size: usize, mode: CharacterMode) -> Result<Vec<Token>> {
    let tokenizer = SegmentingTokenizer::new(
        ReaderSource::new(Cursor::new(text.as_bytes().to_vec())),
        UnicodeSentenceBoundaries::new(),
        UnicodeWordHandler::new(),
        SegmenterConfig { buffer_size, mode },
    )?;
    tokenizer.collect()
}

#[test]
fn test_window_size_does_not_change_words() -> Result<()> {
    let text = sample_text(50);
    let reference = word_tokens(&text, 4096, CharacterMode::Codepoint)?;
    assert!(reference.len() > 150);

    for buffer_size in [40, 64, 257] {
        let tokens = word_tokens(&text, buffer_size, CharacterMode::Codepoint)?;
        assert_eq!(tokens, reference, "buffer size {buffer_size}");
    }
    Ok(())
}

#[test]
fn test_offsets_point_into_input() -> Result<()> {
    let text = sample_text(20);
    let units: Vec<u16> = text.encode_utf16().collect();

    for token in word_tokens(&text, 48, CharacterMode::Codepoint)? {
        let slice = String::from_utf16(&units[token.start_offset..token.end_offset])
            .expect("token offsets split a surrogate pair");
        assert_eq!(slice, token.text);
    }
    Ok(())
}

#[test]
fn test_exact_coverage_with_forced_splits() -> Result<()> {
    // one long line: every window is split without a hard break
    let text: String = sample_text(30).replace(['\n', '\r'], " ");
    for buffer_size in [2, 3, 17, 100] {
        let tokenizer = SegmentingTokenizer::new(
            Utf16Source::from(text.as_str()).with_max_read(5),
            HardBreakBoundaries::new(),
            WholeSentenceHandler::untrimmed(),
            SegmenterConfig {
                buffer_size,
                mode: CharacterMode::Codepoint,
            },
        )?;
        let tokens: Vec<Token> = tokenizer.collect::<Result<_>>()?;

        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, text, "buffer size {buffer_size}");
        assert!(tokens.iter().all(|t| !t.text.contains('\u{FFFD}')));
    }
    Ok(())
}

#[test]
fn test_end_offset_and_reset() -> Result<()> {
    let text = sample_text(5);
    let mut tokenizer = SegmentingTokenizer::new(
        Utf16Source::from(text.as_str()),
        UnicodeSentenceBoundaries::new(),
        UnicodeWordHandler::new(),
        SegmenterConfig {
            buffer_size: 32,
            mode: CharacterMode::Codepoint,
        },
    )?;

    let count = tokenizer.by_ref().count();
    assert!(count > 0);
    assert_eq!(tokenizer.state(), TokenizerState::Done);
    assert_eq!(tokenizer.end(), text.encode_utf16().count());

    tokenizer.reset(Utf16Source::from(text.as_str()));
    assert_eq!(tokenizer.by_ref().count(), count);
    Ok(())
}

#[test]
fn test_invalid_utf8_is_fatal() {
    let tokenizer = SegmentingTokenizer::new(
        ReaderSource::new(Cursor::new(vec![b'o', b'k', b' ', 0xFF, b'x'])),
        UnicodeSentenceBoundaries::new(),
        UnicodeWordHandler::new(),
        SegmenterConfig::default(),
    )
    .unwrap();

    let result: Result<Vec<Token>> = tokenizer.collect();
    assert!(matches!(result, Err(DecompoundError::Io(_))));
}

#[test]
fn test_buffer_fills_never_split_pairs() -> Result<()> {
    let text = "a\u{1F980}bc\u{1F980}\u{1F980}d\u{10400}e";
    let expected = text.chars().count();

    let mut source = Utf16Source::from(text).with_max_read(1);
    let mut buffer = CharacterBuffer::new(3)?;
    let mode = CharacterMode::Codepoint;

    let mut code_points = 0;
    let mut decoded = String::new();
    loop {
        let more = mode.fill_buffer(&mut buffer, &mut source)?;
        let window = buffer.as_slice();
        code_points += mode.code_point_count(window);
        decoded.push_str(&String::from_utf16(window).expect("fill split a surrogate pair"));
        if !more {
            break;
        }
    }

    assert_eq!(code_points, expected);
    assert_eq!(decoded, text);
    Ok(())
}

#[test]
fn test_legacy_fills_count_units() -> Result<()> {
    let text = "a\u{1F980}b";
    let mut source = Utf16Source::from(text);
    let mut buffer = CharacterBuffer::new(2)?;
    let mode = CharacterMode::Legacy;

    let mut counted = 0;
    loop {
        let more = mode.fill_buffer(&mut buffer, &mut source)?;
        counted += mode.code_point_count(buffer.as_slice());
        if !more {
            break;
        }
    }

    // the pair counts as two characters
    assert_eq!(counted, 4);
    Ok(())
}
