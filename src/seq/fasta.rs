// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;

use crate::config::Verbosity;
use crate::errors::SeqError;
use crate::seq::file::SeqFile;
use crate::seq::types::SeqType;

pub fn read_fasta_file<P: AsRef<Path>>(
    path: P,
    seq_type: SeqType,
    verbosity: Verbosity,
) -> Result<SeqFile, SeqError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut result = SeqFile::with_verbosity(verbosity);
    result.filename = path.display().to_string();
    let n = result.ingest_reader(BufReader::new(file), seq_type)?;
    debug!("Read {} record(s) from {}", n, result.filename);
    Ok(result)
}
