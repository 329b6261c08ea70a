// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

pub mod errors;
pub mod rewrite;
pub mod runner;
pub mod seq;

use crate::errors::FastaFixError;

pub use crate::rewrite::{
    extract_first_file, filter_file, first_record, rewrite, IdContains, RewriteSummary, Selector,
    WriteMode, DEFAULT_ID_PATTERN,
};
pub use crate::seq::record::SeqRecord;

pub fn run() -> Result<(), FastaFixError> {
    runner::run()
}
