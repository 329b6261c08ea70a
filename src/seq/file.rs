// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use crate::seq::record::SeqRecord;

// A whole FastA file held in memory, in file order. The rewriter itself streams records through
// FastaReader; this is for callers (and tests) that want everything at once.

pub type SeqFile = Vec<SeqRecord>;
