// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

// One FastA entry. The header line is kept split into its identifier (first token after '>') and
// whatever free text follows it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqRecord {
    pub id: String,
    pub description: String,
    pub sequence: String,
}

impl SeqRecord {
    pub fn new<I, D, S>(id: I, description: D, sequence: S) -> Self
    where
        I: Into<String>,
        D: Into<String>,
        S: Into<String>,
    {
        SeqRecord {
            id: id.into(),
            description: description.into(),
            sequence: sequence.into(),
        }
    }

    /// Header line contents, without the leading '>'.
    pub fn header(&self) -> String {
        if self.description.is_empty() {
            self.id.clone()
        } else {
            format!("{} {}", self.id, self.description)
        }
    }

    /// Replaces the identifier and drops the description; the sequence is left alone.
    pub fn with_new_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = id.into();
        self.description.clear();
        self
    }
}
