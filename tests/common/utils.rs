// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::{NamedTempFile, TempDir};

#[allow(dead_code)]
pub fn fasta_input(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".fa").expect("temp input");
    write!(file, "{}", content).expect("write temp input");
    file.flush().expect("flush temp input");
    file
}

/// A scratch directory and the (not yet existing) output path inside it.
#[allow(dead_code)]
pub fn output_in_tempdir() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("out.fa");
    (dir, path)
}

#[allow(dead_code)]
pub fn read_output<P: AsRef<Path>>(path: P) -> String {
    fs::read_to_string(path).expect("output file")
}
