//! Example demonstrating bounded-memory tokenization of a character stream.
//!
//! Reads standard input when it is not a terminal, otherwise a built-in
//! sample. Run with a small window to watch long input being processed
//! piece by piece:
//!
//! ```text
//! cat book.txt | cargo run --example streaming_tokenizer -- 64
//! ```

use std::io::{self, BufReader, IsTerminal};

use decompound::analysis::char_source::{CharSource, ReaderSource, Utf16Source};
use decompound::analysis::character::CharacterMode;
use decompound::analysis::sentence::UnicodeSentenceBoundaries;
use decompound::analysis::tokenizer::{SegmenterConfig, SegmentingTokenizer, UnicodeWordHandler};
use decompound::error::Result;

const SAMPLE: &str = "Streaming keeps memory bounded. \
Each window ends at the last sentence break it holds!\n\
Emoji like \u{1F980} and letters like 𝒳 are never cut in half.";

fn main() -> Result<()> {
    env_logger::init();

    let buffer_size = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(32);
    let config = SegmenterConfig {
        buffer_size,
        mode: CharacterMode::Codepoint,
    };

    println!("=== Streaming Tokenizer (window of {buffer_size} units) ===\n");
    if io::stdin().is_terminal() {
        run(Utf16Source::from(SAMPLE), config)
    } else {
        run(ReaderSource::new(BufReader::new(io::stdin().lock())), config)
    }
}

fn run<S: CharSource>(source: S, config: SegmenterConfig) -> Result<()> {
    let tokenizer = SegmentingTokenizer::new(
        source,
        UnicodeSentenceBoundaries::new(),
        UnicodeWordHandler::new(),
        config,
    )?;

    let mut count = 0;
    for token in tokenizer {
        let token = token?;
        println!(
            "{:>6} '{}' [{}..{}] {:?}",
            token.position, token.text, token.start_offset, token.end_offset, token.token_type
        );
        count += 1;
    }
    println!("\n{count} token(s)");
    Ok(())
}
