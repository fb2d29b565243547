// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use fastaseq::{
    errors::SeqError,
    seq::fasta,
    SeqFile,
    SeqType,
    Verbosity,
};

#[allow(dead_code)]
pub fn read(path: &str, seq_type: SeqType) -> SeqFile {
    fasta::read_fasta_file(path, seq_type, Verbosity::quiet()).expect("read")
}

#[allow(dead_code)]
pub fn from_text(text: &str, seq_type: SeqType) -> SeqFile {
    let mut seq_file = SeqFile::new();
    seq_file.ingest_str(text, seq_type).expect("ingest");
    seq_file
}

// Runs a writer against an in-memory buffer and hands back what was written.
#[allow(dead_code)]
pub fn capture<F>(f: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> Result<(), SeqError>,
{
    let mut buf: Vec<u8> = Vec::new();
    f(&mut buf).expect("write");
    String::from_utf8(buf).expect("utf-8")
}

#[allow(dead_code)]
pub fn orders(seq_file: &SeqFile) -> Vec<usize> {
    seq_file.iter().map(|r| r.order()).collect()
}
