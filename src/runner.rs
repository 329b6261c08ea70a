// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::path::PathBuf;

use clap::Parser;
use env_logger::{Builder, Env};
use log::{debug, info};

use crate::errors::FastaFixError;
use crate::rewrite::{
    extract_first_file, filter_file, IdContains, RewriteSummary, WriteMode, DEFAULT_ID_PATTERN,
};
use crate::seq::fasta::DEFAULT_LINE_WIDTH;

/// Extract a sequence from a FastA file and give it a clean header.
///
/// By default, only the FIRST record whose identifier contains the pattern ("fasta/") is written;
/// later matches are dropped. Use --all-matches to keep them all.
#[derive(Debug, Parser)]
#[command(version, about, long_about)]
pub struct Cli {
    /// Input FastA file
    pub fa_path: PathBuf,

    /// Output file (overwritten)
    pub output: PathBuf,

    /// Identifier to use in the new header
    pub header_id: String,

    /// Write the first record of the file, whatever its identifier
    #[arg(short, long)]
    pub first: bool,

    /// Write every matching record, not just the first one
    #[arg(short, long = "all-matches", conflicts_with = "first")]
    pub all_matches: bool,

    /// Substring to look for in record identifiers
    #[arg(short, long, default_value = DEFAULT_ID_PATTERN, conflicts_with = "first")]
    pub pattern: String,

    /// Residues per output line (0: don't wrap)
    #[arg(short = 'w', long = "line-width", default_value_t = DEFAULT_LINE_WIDTH)]
    pub line_width: usize,
}

impl Cli {
    pub fn write_mode(&self) -> WriteMode {
        if self.all_matches {
            WriteMode::AllMatches
        } else {
            WriteMode::FirstMatch
        }
    }
}

/// Does the work described by `cli`; no logging setup, no argument parsing.
pub fn execute(cli: &Cli) -> Result<RewriteSummary, FastaFixError> {
    debug!("{:?}", cli);
    if cli.first {
        extract_first_file(&cli.fa_path, &cli.output, &cli.header_id, cli.line_width)
    } else {
        filter_file(
            &cli.fa_path,
            &cli.output,
            &cli.header_id,
            IdContains::new(cli.pattern.as_str()),
            cli.write_mode(),
            cli.line_width,
        )
    }
}

// Warnings (e.g. matches dropped in first-match mode) show without RUST_LOG being set.
const DEFAULT_LOG_FILTER: &str = "warn";

fn log_builder(env: Env) -> Builder {
    Builder::from_env(env.default_filter_or(DEFAULT_LOG_FILTER))
}

pub fn run() -> Result<(), FastaFixError> {
    log_builder(Env::default()).init();
    info!("Starting log");

    let cli = Cli::parse();
    let summary = execute(&cli)?;
    if summary.records_written == 0 {
        info!(
            "no identifier in {} contains '{}'; {} is empty",
            cli.fa_path.display(),
            cli.pattern,
            cli.output.display()
        );
    }
    Ok(())
}
