// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

// Picking records out of a FastA stream and giving them a fresh header.

use std::{fmt, path::Path, slice};

use log::{debug, info, warn};

use crate::errors::FastaFixError;
use crate::seq::fasta::{open_fasta_file, write_fasta_file};
use crate::seq::record::SeqRecord;

/// Substring that marks the records of interest.
pub const DEFAULT_ID_PATTERN: &str = "fasta/";

pub trait Selector {
    fn matches(&self, record: &SeqRecord) -> bool;
}

impl<F> Selector for F
where
    F: Fn(&SeqRecord) -> bool,
{
    fn matches(&self, record: &SeqRecord) -> bool {
        self(record)
    }
}

/// Selects records whose identifier contains a literal substring, anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdContains {
    pattern: String,
}

impl IdContains {
    pub fn new<S: Into<String>>(pattern: S) -> Self {
        IdContains {
            pattern: pattern.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for IdContains {
    fn default() -> Self {
        IdContains::new(DEFAULT_ID_PATTERN)
    }
}

impl Selector for IdContains {
    fn matches(&self, record: &SeqRecord) -> bool {
        record.id.contains(&self.pattern)
    }
}

/// How many of the selected records end up in the output.
///
/// `FirstMatch` keeps the historical behaviour of this tool: only the first selected record is
/// written, and the input is not read past it, so later matches are never written (nor even parsed).
/// `AllMatches` writes every selected record, in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    FirstMatch,
    AllMatches,
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WriteMode::FirstMatch => "first match only",
            WriteMode::AllMatches => "all matches",
        };
        write!(f, "{}", s)
    }
}

/// Lazily keeps the records accepted by `selector`, each renamed to `new_id` with its description
/// cleared. Errors from `records` are passed through where they occur.
pub fn rewrite<'a, I, S>(
    records: I,
    new_id: &'a str,
    selector: S,
) -> impl Iterator<Item = Result<SeqRecord, FastaFixError>> + 'a
where
    I: IntoIterator<Item = Result<SeqRecord, FastaFixError>>,
    I::IntoIter: 'a,
    S: Selector + 'a,
{
    records.into_iter().filter_map(move |res| match res {
        Ok(record) if selector.matches(&record) => {
            debug!("selected '{}'", record.id);
            Some(Ok(record.with_new_id(new_id)))
        }
        Ok(record) => {
            debug!("skipped '{}'", record.id);
            None
        }
        Err(e) => Some(Err(e)),
    })
}

/// The very first record, renamed, whatever its identifier. Nothing past it is read.
pub fn first_record<I>(records: I, new_id: &str) -> Result<SeqRecord, FastaFixError>
where
    I: IntoIterator<Item = Result<SeqRecord, FastaFixError>>,
{
    match records.into_iter().next() {
        Some(res) => Ok(res?.with_new_id(new_id)),
        None => Err(FastaFixError::format("no FASTA records found")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewriteSummary {
    pub records_read: usize,
    pub records_written: usize,
}

/// Whole-file filter mode: writes the records of `input` accepted by `selector` to `output`,
/// renamed to `new_id`. The output file is created (possibly empty) even if nothing matches.
///
/// Selected records are held until the input pass is over; the output is only touched once that
/// pass has succeeded, so any error leaves an existing output file as it was.
pub fn filter_file<P, Q, S>(
    input: P,
    output: Q,
    new_id: &str,
    selector: S,
    mode: WriteMode,
    line_width: usize,
) -> Result<RewriteSummary, FastaFixError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    S: Selector,
{
    let reader = open_fasta_file(&input)?;
    let mut records_read = 0;
    let mut selected: Vec<SeqRecord> = Vec::new();

    let counted = reader.inspect(|res| {
        if res.is_ok() {
            records_read += 1;
        }
    });
    for res in rewrite(counted, new_id, selector) {
        selected.push(res.map_err(|e| e.in_file(&input))?);
        if mode == WriteMode::FirstMatch {
            warn!(
                "keeping only the first matching record; later matches in {} are ignored (see --all-matches)",
                input.as_ref().display()
            );
            break;
        }
    }
    write_fasta_file(&output, &selected, line_width)?;

    let summary = RewriteSummary {
        records_read,
        records_written: selected.len(),
    };
    info!(
        "{} -> {}: read {} record(s), wrote {} ({})",
        input.as_ref().display(),
        output.as_ref().display(),
        summary.records_read,
        summary.records_written,
        mode
    );
    Ok(summary)
}

/// Unconditional mode: writes only the first record of `input` to `output`, renamed to `new_id`.
pub fn extract_first_file<P, Q>(
    input: P,
    output: Q,
    new_id: &str,
    line_width: usize,
) -> Result<RewriteSummary, FastaFixError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let reader = open_fasta_file(&input)?;
    let record = first_record(reader, new_id).map_err(|e| e.in_file(&input))?;
    write_fasta_file(&output, slice::from_ref(&record), line_width)?;

    info!(
        "{} -> {}: wrote first record as '{}'",
        input.as_ref().display(),
        output.as_ref().display(),
        new_id
    );
    Ok(RewriteSummary {
        records_read: 1,
        records_written: 1,
    })
}
