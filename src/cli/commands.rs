//! Command implementations for the decompound CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::char_source::{CharSource, ReaderSource};
use crate::analysis::character::CharacterMode;
use crate::analysis::config::AnalysisConfig;
use crate::analysis::token::TokenType;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{DecompoundError, Result};

/// Execute a CLI command.
pub fn execute_command(args: DecompoundArgs) -> Result<()> {
    match &args.command {
        Command::Analyze(analyze_args) => analyze(analyze_args, &args),
        Command::Sentences(sentences_args) => sentences(sentences_args, &args),
    }
}

/// Tokenize the inputs and split compound words.
fn analyze(args: &AnalyzeArgs, cli_args: &DecompoundArgs) -> Result<()> {
    let config = analyze_config(args)?;
    if config.dictionary.is_none() {
        warn!("no dictionary given, compound words will not be split");
    }

    let analyzer = config.build_analyzer(None)?;
    run(&analyzer, &args.input.files, cli_args)
}

/// Split the inputs into sentences.
fn sentences(args: &SentencesArgs, cli_args: &DecompoundArgs) -> Result<()> {
    let config = input_config(&args.input)?;
    let analyzer = config.build_sentence_analyzer()?;
    run(&analyzer, &args.input.files, cli_args)
}

/// Analyse the inputs and write the results.
fn run(analyzer: &PipelineAnalyzer, files: &[PathBuf], cli_args: &DecompoundArgs) -> Result<()> {
    if files.is_empty() && cli_args.output_format == OutputFormat::Human {
        // standard input may be unbounded: write tokens as they are produced
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let (tokens, subwords) = stream_tokens(analyzer, stdin_source(), &mut out)?;
        out.flush()?;
        info!("standard input analysed: {tokens} token(s), {subwords} subword(s)");
        return Ok(());
    }

    let results = run_analyzer(analyzer, files)?;
    let subwords: usize = results.iter().map(AnalysisResult::subword_count).sum();
    info!("{} input(s) analysed, {subwords} subword(s) found", results.len());
    output_results(&results, cli_args)
}

/// Configuration from the config file, overridden by input flags.
pub fn input_config(input: &InputArgs) -> Result<AnalysisConfig> {
    let mut config = match &input.config {
        Some(path) => {
            debug!("loading configuration from {}", path.display());
            AnalysisConfig::from_file(path)?
        }
        None => AnalysisConfig::default(),
    };

    if input.legacy {
        config.mode = CharacterMode::Legacy;
    }
    if let Some(buffer_size) = input.buffer_size {
        config.buffer_size = buffer_size;
    }
    config.validate()?;
    Ok(config)
}

/// Configuration for the analyze command.
pub fn analyze_config(args: &AnalyzeArgs) -> Result<AnalysisConfig> {
    let mut config = input_config(&args.input)?;

    if let Some(dictionary) = &args.dictionary {
        config.dictionary = Some(dictionary.clone());
    }
    let decompounder = &mut config.decompounder;
    if let Some(size) = args.min_word_size {
        decompounder.min_word_size = size;
    }
    if let Some(size) = args.min_subword_size {
        decompounder.min_subword_size = size;
    }
    if let Some(size) = args.max_subword_size {
        decompounder.max_subword_size = size;
    }
    if args.only_longest_match {
        decompounder.only_longest_match = true;
    }
    config.keywords.extend(args.keywords.iter().cloned());
    if args.no_lowercase {
        config.lowercase = false;
    }

    config.validate()?;
    Ok(config)
}

/// Analyse every file in parallel, or standard input when there are none.
///
/// Inputs are read incrementally through the analyzer's window. Results keep
/// the order of `files`.
fn run_analyzer(analyzer: &PipelineAnalyzer, files: &[PathBuf]) -> Result<Vec<AnalysisResult>> {
    if files.is_empty() {
        return Ok(vec![analyze_source(analyzer, "-", stdin_source())?]);
    }

    files
        .par_iter()
        .map(|path| analyze_file(analyzer, path))
        .collect()
}

fn stdin_source() -> Box<dyn CharSource> {
    Box::new(ReaderSource::new(BufReader::new(io::stdin())))
}

fn analyze_file(analyzer: &PipelineAnalyzer, path: &Path) -> Result<AnalysisResult> {
    let file = File::open(path).map_err(|e| {
        DecompoundError::other(format!("Failed to open '{}': {}", path.display(), e))
    })?;
    let source = Box::new(ReaderSource::new(BufReader::new(file)));
    analyze_source(analyzer, &path.display().to_string(), source).map_err(|e| match e {
        DecompoundError::Io(e) => {
            DecompoundError::other(format!("Failed to read '{}': {}", path.display(), e))
        }
        e => e,
    })
}

/// Run the analyzer over one input.
pub fn analyze_source(
    analyzer: &PipelineAnalyzer,
    name: &str,
    source: Box<dyn CharSource>,
) -> Result<AnalysisResult> {
    let start_time = Instant::now();
    let tokens = analyzer
        .analyze_source(source)?
        .collect::<Result<Vec<_>>>()?;
    let duration = start_time.elapsed();
    debug!(
        "{name}: {} token(s) in {}ms with {}",
        tokens.len(),
        duration.as_millis(),
        analyzer.name()
    );

    Ok(AnalysisResult {
        source: name.to_string(),
        tokens,
        duration_ms: duration.as_millis() as u64,
    })
}

/// Analyse `source` and write each token to `out` as soon as it is produced.
///
/// Returns the number of tokens and subwords written.
pub fn stream_tokens<W: Write>(
    analyzer: &PipelineAnalyzer,
    source: Box<dyn CharSource>,
    out: &mut W,
) -> Result<(usize, usize)> {
    let mut tokens = 0;
    let mut subwords = 0;
    for token in analyzer.analyze_source(source)? {
        let token = token?;
        if token.token_type == TokenType::Subword {
            subwords += 1;
        }
        write_token_line(out, &token)?;
        tokens += 1;
    }
    Ok((tokens, subwords))
}
