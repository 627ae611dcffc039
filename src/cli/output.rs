//! Output formatting for CLI commands.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::analysis::token::{Token, TokenType};
use crate::cli::args::{DecompoundArgs, OutputFormat};
use crate::error::Result;

/// Tokens produced for one input.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// File name, or `-` for standard input.
    pub source: String,
    pub tokens: Vec<Token>,
    pub duration_ms: u64,
}

impl AnalysisResult {
    pub fn subword_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|t| t.token_type == TokenType::Subword)
            .count()
    }
}

/// Output the results in the format selected on the command line.
pub fn output_results(results: &[AnalysisResult], args: &DecompoundArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_results(&mut out, results, args.output_format, args.pretty)?;
    out.flush()?;
    Ok(())
}

/// Write the results to `out`.
pub fn write_results<W: Write>(
    out: &mut W,
    results: &[AnalysisResult],
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    match format {
        OutputFormat::Human => write_human(out, results),
        OutputFormat::Json => write_json(out, results, pretty),
    }
}

/// One line per token; subwords are indented under their compound.
fn write_human<W: Write>(out: &mut W, results: &[AnalysisResult]) -> Result<()> {
    for result in results {
        if results.len() > 1 {
            writeln!(out, "==> {} <==", result.source)?;
        }
        for token in &result.tokens {
            write_token_line(out, token)?;
        }
    }
    Ok(())
}

/// Write one token in the human format.
pub fn write_token_line<W: Write>(out: &mut W, token: &Token) -> Result<()> {
    let marker = if token.token_type == TokenType::Subword {
        "  +"
    } else {
        ""
    };
    writeln!(
        out,
        "{marker}{}\t[{}..{}]\t{:?}{}",
        token.text,
        token.start_offset,
        token.end_offset,
        token.token_type,
        if token.is_keyword() { "\tkeyword" } else { "" }
    )?;
    Ok(())
}

fn write_json<W: Write>(out: &mut W, results: &[AnalysisResult], pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, results)?;
    } else {
        serde_json::to_writer(&mut *out, results)?;
    }
    writeln!(out)?;
    Ok(())
}
