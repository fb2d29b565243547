// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{error, fmt, io};

#[derive(Debug)]
pub enum SeqError {
    Io(io::Error),
    Format(String),
    // Start codon checks and the like need at least one residue.
    EmptySequence,
    InvalidSelector(String),
    Config(String),
}

// These allow conversion to SeqError, required for main() to return Result<()> and for '?' to
// work.

impl From<io::Error> for SeqError {
    fn from(e: io::Error) -> Self {
        SeqError::Io(e)
    }
}

impl From<String> for SeqError {
    fn from(s: String) -> Self {
        SeqError::Format(s)
    }
}

impl From<serde_json::Error> for SeqError {
    fn from(e: serde_json::Error) -> Self {
        SeqError::Config(e.to_string())
    }
}

impl fmt::Display for SeqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeqError::Io(e) => write!(f, "I/O error: {}", e),
            SeqError::Format(msg) => write!(f, "Format error: {}", msg),
            SeqError::EmptySequence => write!(f, "Sequence is empty"),
            SeqError::InvalidSelector(sel) => write!(f, "Invalid selector: {}", sel),
            SeqError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl error::Error for SeqError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            SeqError::Io(e) => Some(e),
            _ => None,
        }
    }
}
