//! Command line argument parsing for the decompound CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Decompound - streaming tokenizer and compound word splitter
#[derive(Parser, Debug, Clone)]
#[command(name = "decompound")]
#[command(about = "Tokenize text and split compound words against a dictionary")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct DecompoundArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl DecompoundArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Tokenize text into words and add the subwords of compound words
    Analyze(AnalyzeArgs),

    /// Split text into sentences
    Sentences(SentencesArgs),
}

/// Input and segmentation options shared by all commands
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Input files; standard input is read when none are given
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Analysis configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Tokenizer window size in UTF-16 units
    #[arg(long, value_name = "UNITS")]
    pub buffer_size: Option<usize>,

    /// Treat every UTF-16 unit as one character (no surrogate pair handling)
    #[arg(long)]
    pub legacy: bool,
}

/// Arguments for the analyze command
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Dictionary file: a word list (one word per line) or a JSON array
    #[arg(short, long, value_name = "DICTIONARY_FILE", env = "DECOMPOUND_DICTIONARY")]
    pub dictionary: Option<PathBuf>,

    /// Words shorter than this are never decomposed
    #[arg(long)]
    pub min_word_size: Option<usize>,

    /// Shortest subword to look up
    #[arg(long)]
    pub min_subword_size: Option<usize>,

    /// Longest subword to look up
    #[arg(long)]
    pub max_subword_size: Option<usize>,

    /// Keep only the longest subword at each position
    #[arg(long)]
    pub only_longest_match: bool,

    /// Words that are never decomposed (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub keywords: Vec<String>,

    /// Keep the original case of tokens
    #[arg(long)]
    pub no_lowercase: bool,
}

/// Arguments for the sentences command
#[derive(Parser, Debug, Clone)]
pub struct SentencesArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable token table
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let args = DecompoundArgs::try_parse_from([
            "decompound",
            "analyze",
            "-d",
            "words.txt",
            "--min-subword-size",
            "3",
            "--only-longest-match",
            "-k",
            "Bundestag,Bundesrat",
            "a.txt",
            "b.txt",
            "-f",
            "json",
        ])
        .unwrap();

        assert_eq!(args.output_format, OutputFormat::Json);
        let Command::Analyze(analyze) = args.command else {
            panic!("expected analyze");
        };
        assert_eq!(analyze.dictionary, Some(PathBuf::from("words.txt")));
        assert_eq!(analyze.min_subword_size, Some(3));
        assert!(analyze.only_longest_match);
        assert_eq!(analyze.keywords, vec!["Bundestag", "Bundesrat"]);
        assert_eq!(analyze.input.files.len(), 2);
    }

    #[test]
    fn test_verbosity() {
        let args = DecompoundArgs::try_parse_from(["decompound", "sentences"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = DecompoundArgs::try_parse_from(["decompound", "-vv", "sentences"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args =
            DecompoundArgs::try_parse_from(["decompound", "-v", "-q", "sentences", "--legacy"])
                .unwrap();
        assert_eq!(args.verbosity(), 0);
    }
}
