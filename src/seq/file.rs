// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

// A sequence file is an ordered list of records that share a molecule type and (usually) a
// parent: the contigs of a genome, or the genes or proteins of one contig. Each record's `order`
// is its 1-based position at the time it was added; deleting records leaves gaps until
// renumber() is called.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::rc::Rc;

use log::{info, warn};

use crate::config::Verbosity;
use crate::errors::SeqError;
use crate::seq::annotation::Annotation;
use crate::seq::gff::GffFeature;
use crate::seq::header::{self, HeaderKind};
use crate::seq::record::SeqRecord;
use crate::seq::types::{Case, MoleculeType, SeqType};

pub const UNKNOWN_FILENAME: &str = "unknown";

/// Optional per-record data for `SeqFile::add_with_metadata()`.
#[derive(Clone, Debug, Default)]
pub struct RecordMetadata {
    pub annotations: Option<Vec<Rc<dyn Annotation>>>,
    pub contig: Option<String>,
}

#[derive(Debug)]
pub struct SeqFile {
    records: Vec<SeqRecord>,
    annotations: Vec<Rc<dyn Annotation>>,
    pub filename: String,
    molecule_type: MoleculeType,
    pub contig: String,
    // contig name for a gene or protein set; genome name for a contig set
    parent_name: String,
    verbosity: Verbosity,
}

impl Default for SeqFile {
    fn default() -> Self {
        SeqFile::with_verbosity(Verbosity::default())
    }
}

impl SeqFile {
    pub fn new() -> Self {
        SeqFile::default()
    }

    pub fn with_verbosity(verbosity: Verbosity) -> Self {
        SeqFile {
            records: Vec::new(),
            annotations: Vec::new(),
            filename: String::from(UNKNOWN_FILENAME),
            molecule_type: MoleculeType::Unknown,
            contig: String::from("unknown"),
            parent_name: String::new(),
            verbosity,
        }
    }

    pub fn verbosity(&self) -> &Verbosity {
        &self.verbosity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SeqRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SeqRecord> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, SeqRecord> {
        self.records.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&SeqRecord> {
        self.records.get(index)
    }

    pub fn molecule_type(&self) -> MoleculeType {
        self.molecule_type
    }

    pub fn parent_name(&self) -> &str {
        &self.parent_name
    }

    pub fn annotations(&self) -> &[Rc<dyn Annotation>] {
        &self.annotations
    }

    pub fn add_annotation(&mut self, annotation: Rc<dyn Annotation>) {
        self.annotations.push(annotation);
    }

    // Adding and removing

    /// Appends `rec`, stamping it with the next order number and this file's molecule type.
    pub fn add(&mut self, mut rec: SeqRecord) {
        rec.set_molecule_type(self.molecule_type);
        rec.set_order(self.records.len() + 1);
        self.records.push(rec);
    }

    pub fn add_with_metadata(&mut self, mut rec: SeqRecord, metadata: RecordMetadata) {
        if let Some(annotations) = metadata.annotations {
            rec.set_annotations(annotations);
        }
        if let Some(contig) = metadata.contig {
            rec.assign_contig(&contig);
        }
        self.add(rec);
    }

    /// Removes the first record equal to `rec`. Remaining records keep their order numbers.
    pub fn remove(&mut self, rec: &SeqRecord) -> bool {
        match self.records.iter().position(|r| r == rec) {
            Some(i) => {
                self.records.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Option<SeqRecord> {
        if index < self.records.len() {
            Some(self.records.remove(index))
        } else {
            None
        }
    }

    /// Closes gaps in the ordering: orders become 1..N in list order.
    pub fn renumber(&mut self) {
        for (i, rec) in self.records.iter_mut().enumerate() {
            rec.set_order(i + 1);
        }
    }

    // Ingestion

    /// Splits multi-FASTA `lines` into records and appends them in the order encountered.
    /// Returns the number of records created. The first non-blank line must be a header.
    pub fn ingest<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        seq_type: SeqType,
    ) -> Result<usize, SeqError> {
        // Header lines are kept as written, apart from the line terminator.
        let mut lines = lines
            .iter()
            .map(|l| l.as_ref().trim_end_matches(|c: char| c == '\r' || c == '\n'));
        let first = match lines.by_ref().find(|l| !l.trim().is_empty()) {
            Some(l) => l,
            None => return Ok(0),
        };
        if !header::is_header_line(first) {
            return Err(SeqError::Format(format!(
                "Expected a FASTA header (starting with '>'), found: {}",
                first
            )));
        }

        let mut added = 0;
        let mut current_header = first;
        let mut current_body: Vec<&str> = Vec::new();
        for line in lines {
            if header::is_header_line(line) {
                self.add(self.new_record(current_header, &current_body, seq_type));
                added += 1;
                current_header = line;
                current_body.clear();
            } else {
                current_body.push(line.trim());
            }
        }
        self.add(self.new_record(current_header, &current_body, seq_type));
        added += 1;

        if self.verbosity.progress {
            info!("Added {} sequence(s) from {}", added, self.filename);
        }
        Ok(added)
    }

    fn new_record(&self, hdr: &str, body: &[&str], seq_type: SeqType) -> SeqRecord {
        let mut rec = SeqRecord::with_verbosity(self.verbosity);
        rec.set_molecule_type(self.molecule_type);
        rec.assign_header(hdr);
        rec.assign_sequence_lines(body);
        rec.seq_type = seq_type;
        rec
    }

    pub fn ingest_str(&mut self, text: &str, seq_type: SeqType) -> Result<usize, SeqError> {
        let lines: Vec<&str> = text.lines().collect();
        self.ingest(&lines, seq_type)
    }

    pub fn ingest_reader<R: BufRead>(
        &mut self,
        reader: R,
        seq_type: SeqType,
    ) -> Result<usize, SeqError> {
        let lines = reader.lines().collect::<Result<Vec<String>, _>>()?;
        self.ingest(&lines, seq_type)
    }

    /// Reads records from the file named by `self.filename`, which must have been set.
    pub fn read_file(&mut self, seq_type: SeqType) -> Result<usize, SeqError> {
        if self.filename.is_empty() || self.filename == UNKNOWN_FILENAME {
            return Err(SeqError::Format(String::from(
                "No filename set; set `filename` before reading",
            )));
        }
        let path = Path::new(&self.filename).to_path_buf();
        let file = File::open(&path)?;
        self.ingest_reader(BufReader::new(file), seq_type)
    }

    // Lookup

    /// First record whose full header contains `pattern`.
    pub fn find_by_header_substring(&self, pattern: &str) -> Option<&SeqRecord> {
        let found = self.records.iter().find(|r| r.header().contains(pattern));
        if found.is_none() {
            self.warn_not_found(pattern);
        }
        found
    }

    pub fn find_by_header_substring_mut(&mut self, pattern: &str) -> Option<&mut SeqRecord> {
        self.records.iter_mut().find(|r| r.header().contains(pattern))
    }

    /// First record whose full header is exactly `hdr` (no leading '>').
    pub fn find_by_exact_header(&self, hdr: &str) -> Option<&SeqRecord> {
        let found = self.records.iter().find(|r| r.header() == hdr);
        if found.is_none() {
            self.warn_not_found(hdr);
        }
        found
    }

    pub fn find_by_exact_header_mut(&mut self, hdr: &str) -> Option<&mut SeqRecord> {
        self.records.iter_mut().find(|r| r.header() == hdr)
    }

    fn warn_not_found(&self, what: &str) {
        if self.verbosity.warnings {
            warn!("Sequence not found for {}", what);
        }
    }

    // Statistics

    /// Number of records with at least one paralog (not the total number of paralogs).
    pub fn count_records_with_paralogs(&self) -> usize {
        self.records.iter().filter(|r| !r.paralogs().is_empty()).count()
    }

    pub fn report_stats(&self) -> Vec<String> {
        let stats = vec![
            format!("Sequence from file name:{}", self.filename),
            format!("Number of fasta sequence:{}", self.records.len()),
            format!("Number of annotations:{}", self.annotations.len()),
            format!(
                "No. of fasta sequence with paralogs: {}",
                self.count_records_with_paralogs()
            ),
        ];
        if self.verbosity.messages {
            for line in &stats {
                info!("{}", line);
            }
        }
        stats
    }

    // Bulk assignment

    pub fn assign_molecule_type(&mut self, molecule_type: MoleculeType) {
        self.molecule_type = molecule_type;
        for rec in self.records.iter_mut() {
            rec.set_molecule_type(molecule_type);
        }
    }

    pub fn assign_contig(&mut self, contig: &str) {
        self.contig = contig.to_string();
    }

    pub fn assign_contig_to_all(&mut self, contig: &str) {
        for rec in self.records.iter_mut() {
            rec.assign_contig(contig);
        }
    }

    pub fn assign_parent(&mut self, parent: &str) {
        self.parent_name = parent.to_string();
        for rec in self.records.iter_mut() {
            rec.parent_name = parent.to_string();
        }
    }

    /// Sets every record's compound header to `<parent>_<clean header>`.
    pub fn assign_compound_headers(&mut self, parent: &str) {
        for rec in self.records.iter_mut() {
            let clean = rec.clean_header().to_string();
            rec.assign_compound_header(&clean, parent);
        }
    }

    pub fn remove_emboss_postfix(&mut self) {
        for rec in self.records.iter_mut() {
            rec.remove_emboss_postfix();
        }
    }

    // Output, in list order. The writer is neither flushed nor closed.

    pub fn write_fasta<W: Write>(&self, w: &mut W, kind: HeaderKind) -> Result<(), SeqError> {
        for rec in &self.records {
            rec.write_fasta(w, kind)?;
        }
        Ok(())
    }

    pub fn write_fasta_wrapped<W: Write>(
        &self,
        w: &mut W,
        kind: HeaderKind,
        line_len: usize,
    ) -> Result<(), SeqError> {
        for rec in &self.records {
            rec.write_fasta_wrapped(w, kind, line_len)?;
        }
        Ok(())
    }

    pub fn write_fasta_case<W: Write>(
        &self,
        w: &mut W,
        case: Case,
        kind: HeaderKind,
    ) -> Result<(), SeqError> {
        for rec in &self.records {
            rec.write_fasta_case(w, case, kind)?;
        }
        Ok(())
    }

    /// Writes only the records that have a custom header, under that header.
    pub fn write_fasta_custom<W: Write>(&self, w: &mut W) -> Result<(), SeqError> {
        for rec in self.records.iter().filter(|r| !r.custom_header().is_empty()) {
            rec.write_fasta(w, HeaderKind::Custom)?;
        }
        Ok(())
    }

    pub fn write_tab<W: Write>(&self, w: &mut W) -> Result<(), SeqError> {
        for rec in &self.records {
            rec.write_tab(w)?;
        }
        Ok(())
    }

    pub fn write_tab_detailed<W: Write>(&self, w: &mut W) -> Result<(), SeqError> {
        for rec in &self.records {
            rec.write_tab_detailed(w)?;
        }
        Ok(())
    }

    pub fn write_all<W: Write>(&self, w: &mut W) -> Result<(), SeqError> {
        writeln!(w, "Number of fastas:{}", self.records.len())?;
        for (i, rec) in self.records.iter().enumerate() {
            writeln!(w, "*****List item no.{}:", i + 1)?;
            rec.write_all(w)?;
            writeln!(w)?;
        }
        Ok(())
    }

    pub fn write_gff<W: Write>(
        &self,
        w: &mut W,
        feature: GffFeature,
        contig_name: &str,
    ) -> Result<(), SeqError> {
        for rec in &self.records {
            rec.write_gff(w, feature, contig_name)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SeqFile {
    type Item = &'a SeqRecord;
    type IntoIter = std::slice::Iter<'a, SeqRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
