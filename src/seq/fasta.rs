// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Lines, Write};
use std::iter::FusedIterator;
use std::path::Path;

use itertools::Itertools;
use log::debug;

use crate::errors::FastaFixError;
use crate::seq::file::SeqFile;
use crate::seq::record::SeqRecord;

/// Residues per line on output. Same as Biopython's FastA writer.
pub const DEFAULT_LINE_WIDTH: usize = 60;

/// Lazy FastA parser: yields one record per '>' block, in file order.
///
/// The reader stops (returns `None` forever) after the first error it yields.
pub struct FastaReader<R: BufRead> {
    lines: Lines<R>,
    line_num: usize,
    // Header line (sans '>') already consumed while reading the previous record, and its line
    // number.
    pending: Option<(String, usize)>,
    started: bool,
    done: bool,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        FastaReader {
            lines: reader.lines(),
            line_num: 0,
            pending: None,
            started: false,
            done: false,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, FastaFixError> {
        match self.lines.next() {
            None => Ok(None),
            Some(Ok(line)) => {
                self.line_num += 1;
                Ok(Some(line))
            }
            // Not text: a content problem, not an I/O one.
            Some(Err(e)) if e.kind() == io::ErrorKind::InvalidData => {
                Err(FastaFixError::format(format!(
                    "invalid UTF-8 on line {}",
                    self.line_num + 1
                )))
            }
            Some(Err(e)) => Err(e.into()),
        }
    }

    // Skips leading blank lines; anything else before the first header is an error.
    fn first_header(&mut self) -> Result<(String, usize), FastaFixError> {
        while let Some(line) = self.next_line()? {
            if line.trim().is_empty() {
                continue;
            }
            return match line.strip_prefix('>') {
                Some(hdr) => Ok((hdr.to_string(), self.line_num)),
                None => Err(FastaFixError::format(format!(
                    "expected a '>' header on line {}, found '{}'",
                    self.line_num,
                    truncate(&line, 40)
                ))),
            };
        }
        Err(FastaFixError::format("no FASTA records found"))
    }

    fn read_record(&mut self) -> Result<Option<SeqRecord>, FastaFixError> {
        let (header, header_line) = match self.pending.take() {
            Some(pending) => pending,
            None if self.started => return Ok(None),
            None => self.first_header()?,
        };
        self.started = true;

        let header = header.trim();
        let (id, description) = match header.split_once(char::is_whitespace) {
            Some((id, rest)) => (id, rest.trim()),
            None => (header, ""),
        };
        if id.is_empty() {
            return Err(FastaFixError::format(format!(
                "empty identifier in header on line {}",
                header_line
            )));
        }

        let mut sequence = String::new();
        while let Some(line) = self.next_line()? {
            if let Some(next_hdr) = line.strip_prefix('>') {
                self.pending = Some((next_hdr.to_string(), self.line_num));
                break;
            }
            sequence.extend(line.chars().filter(|c| !c.is_whitespace()));
        }
        if sequence.is_empty() {
            return Err(FastaFixError::format(format!(
                "record '{}' (line {}) has no sequence data",
                id, header_line
            )));
        }

        debug!("parsed record '{}' ({} residues)", id, sequence.len());
        Ok(Some(SeqRecord::new(id, description, sequence)))
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<SeqRecord, FastaFixError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for FastaReader<R> {}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max_chars).collect();
        t.push_str("...");
        t
    }
}

/// Opens `path` for lazy reading. Errors yielded later by the reader do not carry the path; the
/// caller is expected to tag them (see `FastaFixError::in_file`).
pub fn open_fasta_file<P: AsRef<Path>>(
    path: P,
) -> Result<FastaReader<BufReader<File>>, FastaFixError> {
    let file = File::open(&path).map_err(|e| FastaFixError::from(e).in_file(&path))?;
    Ok(FastaReader::new(BufReader::new(file)))
}

pub fn read_fasta_file<P: AsRef<Path>>(path: P) -> Result<SeqFile, FastaFixError> {
    open_fasta_file(&path)?
        .collect::<Result<SeqFile, FastaFixError>>()
        .map_err(|e| e.in_file(&path))
}

/// Serializes records as FastA, wrapping sequences at a fixed number of characters (0: no
/// wrapping). Output depends only on the records and the width.
pub struct FastaWriter<W: Write> {
    inner: W,
    line_width: usize,
    written: usize,
}

impl<W: Write> FastaWriter<W> {
    pub fn new(inner: W, line_width: usize) -> Self {
        FastaWriter {
            inner,
            line_width,
            written: 0,
        }
    }

    pub fn write_record(&mut self, record: &SeqRecord) -> Result<(), FastaFixError> {
        writeln!(self.inner, ">{}", record.header())?;
        if self.line_width == 0 {
            writeln!(self.inner, "{}", record.sequence)?;
        } else {
            let chunks = record.sequence.chars().chunks(self.line_width);
            for chunk in &chunks {
                let line: String = chunk.collect();
                writeln!(self.inner, "{}", line)?;
            }
        }
        self.written += 1;
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.written
    }

    /// Flushes and hands back the underlying writer.
    pub fn into_inner(mut self) -> Result<W, FastaFixError> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Writes `records` to a fresh file at `path` (truncating any existing one).
pub fn write_fasta_file<P: AsRef<Path>>(
    path: P,
    records: &[SeqRecord],
    line_width: usize,
) -> Result<(), FastaFixError> {
    let write_all = || -> Result<(), FastaFixError> {
        let mut writer = FastaWriter::new(BufWriter::new(File::create(&path)?), line_width);
        for record in records {
            writer.write_record(record)?;
        }
        writer.into_inner()?;
        Ok(())
    };
    write_all().map_err(|e| e.in_file(&path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<SeqFile, FastaFixError> {
        FastaReader::new(text.as_bytes()).collect()
    }

    fn serialize(records: &[SeqRecord], width: usize) -> String {
        let mut writer = FastaWriter::new(Vec::new(), width);
        for rec in records {
            writer.write_record(rec).expect("write to Vec");
        }
        String::from_utf8(writer.into_inner().expect("flush")).expect("utf-8")
    }

    #[test]
    fn test_read_single_record() {
        let fasta = parse(">seq1\nGAATTC\n").expect("parse");
        assert_eq!(fasta.len(), 1);
        assert_eq!(fasta[0].id, "seq1");
        assert_eq!(fasta[0].description, "");
        assert_eq!(fasta[0].sequence, "GAATTC");
    }

    #[test]
    fn test_read_multiline_records() {
        let text = ">seq1 first one\nTTGCCG-\nCGA\n>seq2\nTTCCCGGCGA\n>seq3   spaced   out  \nTTACCG\n-CAA";
        let fasta = parse(text).expect("parse");
        assert_eq!(fasta.len(), 3);
        assert_eq!(fasta[0].id, "seq1");
        assert_eq!(fasta[0].description, "first one");
        assert_eq!(fasta[0].sequence, "TTGCCG-CGA");
        assert_eq!(fasta[1].sequence, "TTCCCGGCGA");
        assert_eq!(fasta[2].id, "seq3");
        assert_eq!(fasta[2].description, "spaced   out");
        assert_eq!(fasta[2].sequence, "TTACCG-CAA");
    }

    #[test]
    fn test_read_crlf_and_blank_lines() {
        let text = "\r\n\n>a_fasta/1 desc\r\nMK\r\n\r\nV\r\n>b\r\nMKL\r\n";
        let fasta = parse(text).expect("parse");
        assert_eq!(fasta[0].id, "a_fasta/1");
        assert_eq!(fasta[0].description, "desc");
        assert_eq!(fasta[0].sequence, "MKV");
        assert_eq!(fasta[1].sequence, "MKL");
    }

    #[test]
    fn test_empty_input_is_format_error() {
        let err = parse("").unwrap_err();
        assert!(err.is_format());
        let err = parse("\n  \n").unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_missing_header_is_format_error() {
        let err = parse("ACGT\n>seq1\nACGT\n").unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("line 1"), "{}", err);
    }

    #[test]
    fn test_empty_sequence_is_format_error() {
        let err = parse(">lonely\n").unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("lonely"));

        let err = parse(">s1\nMKV\n>s2\n>s3\nMKT\n").unwrap_err();
        assert!(err.to_string().contains("'s2' (line 3)"), "{}", err);
    }

    #[test]
    fn test_invalid_utf8_is_format_error() {
        let bytes: &[u8] = b">a_fasta/1\nMK\xff\xfeV\n";
        let err = FastaReader::new(bytes)
            .collect::<Result<SeqFile, FastaFixError>>()
            .unwrap_err();
        assert!(err.is_format(), "{}", err);
        assert!(err.to_string().contains("line 2"), "{}", err);
    }

    #[test]
    fn test_write_fasta_file_then_read_back() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("out.fa");
        std::fs::write(&path, ">old\nAAAAAAAAAA\n>older\nCC\n").expect("seed output");
        let recs = vec![
            SeqRecord::new("s1", "", "MKVLA"),
            SeqRecord::new("s2", "kept", "MKT"),
        ];
        write_fasta_file(&path, &recs, 2).expect("write");
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            ">s1\nMK\nVL\nA\n>s2 kept\nMK\nT\n"
        );
        assert_eq!(read_fasta_file(&path).expect("reparse"), recs);
    }

    #[test]
    fn test_write_fasta_file_names_unwritable_path() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("missing").join("out.fa");
        let err = write_fasta_file(&path, &[SeqRecord::new("s", "", "M")], 60).unwrap_err();
        assert!(err.is_io());
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[test]
    fn test_empty_identifier_is_format_error() {
        let err = parse(">\nMKV\n").unwrap_err();
        assert!(err.is_format());
        let err = parse(">s1\nMKV\n>   \nMKT\n").unwrap_err();
        assert!(err.to_string().contains("line 3"), "{}", err);
    }

    #[test]
    fn test_reader_is_lazy_and_fused() {
        let mut reader = FastaReader::new(">s1\nMKV\n>s2\n>s3\nMKT\n".as_bytes());
        assert_eq!(reader.next().expect("record").expect("ok").id, "s1");
        assert!(reader.next().expect("error").is_err());
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_write_wraps_by_chars() {
        let seq: String = "ACGTACGTAC".repeat(13);
        let rec = SeqRecord::new("long", "", seq.clone());
        let out = serialize(&[rec], DEFAULT_LINE_WIDTH);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], ">long");
        assert_eq!(lines[1].len(), 60);
        assert_eq!(lines[2].len(), 60);
        assert_eq!(lines[3].len(), 10);
        assert_eq!(lines[1..].concat(), seq);
    }

    #[test]
    fn test_write_unwrapped() {
        let rec = SeqRecord::new("s", "some text", "A".repeat(150));
        let out = serialize(&[rec], 0);
        assert_eq!(out, format!(">s some text\n{}\n", "A".repeat(150)));
    }

    #[test]
    fn test_write_is_byte_stable() {
        let recs = vec![
            SeqRecord::new("x", "", "MKVLA"),
            SeqRecord::new("y", "d", "MKT"),
        ];
        assert_eq!(serialize(&recs, 3), serialize(&recs, 3));
        insta::assert_snapshot!(serialize(&recs, 3), @r"
        >x
        MKV
        LA
        >y d
        MKT
        ");
    }

    #[test]
    fn test_round_trip_keeps_id_and_sequence() {
        let text = ">contig_1_fasta/1 len=75\nMKVLAAGIVGLLLAAHGAQAEPTKVQVSGMKVLAAGIVG\nLLLAAHGAQAEPTKVQVSG\n>other\nM\n";
        let first = parse(text).expect("parse");
        let second = parse(&serialize(&first, 7)).expect("reparse");
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.sequence, b.sequence);
        }
    }
}
