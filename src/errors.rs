// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::{
    error::Error,
    fmt, io,
    path::{Path, PathBuf},
};

#[derive(Debug)]
pub enum FastaFixError {
    Io(io::Error),
    Format(String),
    // Either of the above, plus the file it happened in.
    File {
        path: PathBuf,
        source: Box<FastaFixError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Format,
}

impl FastaFixError {
    pub fn format<S: Into<String>>(msg: S) -> Self {
        FastaFixError::Format(msg.into())
    }

    /// Attaches `path` to the error, unless it already carries one.
    pub fn in_file<P: AsRef<Path>>(self, path: P) -> Self {
        match self {
            FastaFixError::File { .. } => self,
            other => FastaFixError::File {
                path: path.as_ref().to_path_buf(),
                source: Box::new(other),
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FastaFixError::Io(_) => ErrorKind::Io,
            FastaFixError::Format(_) => ErrorKind::Format,
            FastaFixError::File { source, .. } => source.kind(),
        }
    }

    pub fn is_format(&self) -> bool {
        self.kind() == ErrorKind::Format
    }

    pub fn is_io(&self) -> bool {
        self.kind() == ErrorKind::Io
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            FastaFixError::File { path, .. } => Some(path),
            _ => None,
        }
    }
}

// These allow conversion to FastaFixError, so that '?' works on io and string results.

impl From<io::Error> for FastaFixError {
    fn from(e: io::Error) -> Self {
        FastaFixError::Io(e)
    }
}

impl From<String> for FastaFixError {
    fn from(s: String) -> Self {
        FastaFixError::Format(s)
    }
}

impl fmt::Display for FastaFixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FastaFixError::Io(e) => write!(f, "I/O error: {}", e),
            FastaFixError::Format(msg) => write!(f, "Format error: {}", msg),
            FastaFixError::File { path, source } => write!(f, "{}: {}", path.display(), source),
        }
    }
}

impl Error for FastaFixError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FastaFixError::Io(e) => Some(e),
            FastaFixError::Format(_) => None,
            FastaFixError::File { source, .. } => Some(source.as_ref()),
        }
    }
}
