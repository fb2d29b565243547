// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

// A record for one sequence: a family of headers derived from the original one, the sequence
// itself (kept as a single lower-case string without white space, digits or '*'), and whatever
// we know about where the sequence sits on its parent (eg, a gene on a contig, or a protein
// translated from a gene).

use std::io::Write;
use std::rc::Rc;
use std::sync::OnceLock;

use itertools::Itertools;
use log::{debug, warn};
use regex::Regex;

use crate::config::Verbosity;
use crate::errors::SeqError;
use crate::seq::annotation::Annotation;
use crate::seq::gff::{self, GffFeature, GFF_PHASE, GFF_SCORE, GFF_SOURCE};
use crate::seq::header::{self, HeaderKind, DEFAULT_TRUNCATION, RECORD_MARKER};
use crate::seq::types::{Case, MoleculeType, SeqType, StartCodonClass, Strand};

pub const START_CODON: &str = "atg";
// Sequences at least this long are not written out by the tabular dumps.
pub const TAB_MAX_SEQ_LEN: usize = 1000;
pub const TAB_SEQ_TOO_LONG: &str = "Sequence too long to print. See file.";
pub const NO_ANNOTATIONS: &str = "There are no annotations";

fn start_codon_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(START_CODON).expect("valid regex"))
}

/// A homologous sequence in the same genome, as found by a similarity search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paralog {
    pub header: String,
    pub hit: String,
}

/// Fields for `SeqRecord::enter_data()`. Any field left at `None` keeps the record's current
/// value.
#[derive(Clone, Debug, Default)]
pub struct RecordData {
    pub header: Option<String>,
    pub name: Option<String>,
    pub sequence: Option<String>,
    pub seq_type: Option<SeqType>,
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub strand: Option<Strand>,
    pub parent_sequence: Option<String>,
    pub parent_name: Option<String>,
    pub parent_start: Option<usize>,
    pub parent_end: Option<usize>,
    pub parent_strand: Option<Strand>,
    pub order: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct SeqRecord {
    // Header family; see assign_header().
    header: String,
    clean_header: String,
    trunc_header: String,
    short_header: String,
    compound_header: String,
    blast_header: String,
    sequential_header: String,
    custom_header: String,
    truncation: usize,

    sequence: String,
    pub seq_type: SeqType,
    molecule_type: MoleculeType,

    // Gene caller + number, for genes and proteins that come from a gene call.
    pub name: String,
    pub number: usize,
    pub gene_caller: String,
    pub gene_call_file: String,
    // Lower is more reliable.
    pub gene_call_rank: u32,

    pub start: usize,
    pub end: usize,
    pub strand: Strand,
    // eg, for a gene, the contig that the gene is on
    parent_sequence: String,
    pub parent_name: String,
    pub parent_start: usize,
    pub parent_end: usize,
    pub parent_strand: Strand,
    pub contig: String,

    // 1-based position in the owning SeqFile.
    order: usize,

    annotations: Vec<Rc<dyn Annotation>>,
    paralogs: Vec<Paralog>,
    pvog_associations: Vec<String>,

    start_codon_count: usize,
    codon_start_locs: Vec<usize>,

    verbosity: Verbosity,
}

impl Default for SeqRecord {
    fn default() -> Self {
        SeqRecord::with_verbosity(Verbosity::default())
    }
}

// Annotations are compared by identity: two records are equal only if they share the very same
// annotation objects.
impl PartialEq for SeqRecord {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
            && self.compound_header == other.compound_header
            && self.custom_header == other.custom_header
            && self.sequence == other.sequence
            && self.seq_type == other.seq_type
            && self.molecule_type == other.molecule_type
            && self.name == other.name
            && self.order == other.order
            && self.start == other.start
            && self.end == other.end
            && self.strand == other.strand
            && self.parent_name == other.parent_name
            && self.parent_start == other.parent_start
            && self.parent_end == other.parent_end
            && self.contig == other.contig
            && self.paralogs == other.paralogs
            && self.annotations.len() == other.annotations.len()
            && self
                .annotations
                .iter()
                .zip(&other.annotations)
                .all(|(a, b)| Rc::ptr_eq(a, b))
    }
}

impl SeqRecord {
    pub fn new() -> Self {
        SeqRecord::default()
    }

    pub fn with_verbosity(verbosity: Verbosity) -> Self {
        SeqRecord {
            header: String::from("unknown"),
            clean_header: String::new(),
            trunc_header: String::new(),
            short_header: String::new(),
            compound_header: String::new(),
            blast_header: String::new(),
            sequential_header: String::from("hdr"),
            custom_header: String::new(),
            truncation: DEFAULT_TRUNCATION,
            sequence: String::new(),
            seq_type: SeqType::Unknown,
            molecule_type: MoleculeType::Unknown,
            name: String::from("none"),
            number: 0,
            gene_caller: String::from("unknown"),
            gene_call_file: String::from("unknown"),
            gene_call_rank: 0,
            start: 0,
            end: 0,
            strand: Strand::Unknown,
            parent_sequence: String::new(),
            parent_name: String::new(),
            parent_start: 0,
            parent_end: 0,
            parent_strand: Strand::Unknown,
            contig: String::from("unknown"),
            order: 0,
            annotations: Vec::new(),
            paralogs: Vec::new(),
            pvog_associations: Vec::new(),
            start_codon_count: 0,
            codon_start_locs: Vec::new(),
            verbosity,
        }
    }

    /// Convenience constructor: header, then sequence.
    pub fn from_parts(header: &str, sequence: &str, seq_type: SeqType) -> Self {
        let mut rec = SeqRecord::new();
        rec.assign_header(header);
        rec.assign_sequence(sequence);
        rec.seq_type = seq_type;
        rec
    }

    pub fn verbosity(&self) -> &Verbosity {
        &self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.verbosity = verbosity;
    }

    // Headers

    /// Stores `raw` (minus one leading '>') as the full header and derives every other header
    /// variant from it.
    pub fn assign_header(&mut self, raw: &str) {
        self.header = header::strip_marker(raw).to_string();
        self.derive_headers();
    }

    fn derive_headers(&mut self) {
        self.blast_header = header::blast_token(&self.header).to_string();
        self.clean_header = header::clean(&self.header);
        self.trunc_header = header::truncate(&self.header, self.truncation);
        self.refresh_sequential_header();
        self.short_header = match header::leading_token(&self.header) {
            Some(tok) => tok.to_string(),
            None => self.trunc_header.clone(),
        };
        self.compound_header = if self.parent_sequence.is_empty() {
            self.header.clone()
        } else {
            format!("{}_{}", self.header, self.parent_sequence)
        };
    }

    fn refresh_sequential_header(&mut self) {
        self.sequential_header = format!("{}-{}", self.molecule_type, self.order);
    }

    /// Sets the compound header directly, as `<parent>_<hdr>`. Typically called with the clean
    /// header.
    pub fn assign_compound_header(&mut self, hdr: &str, parent: &str) {
        self.compound_header = format!("{}_{}", parent, hdr);
    }

    pub fn assign_custom_header(&mut self, custom: &str) {
        self.custom_header = custom.to_string();
    }

    pub fn assign_contig(&mut self, contig: &str) {
        self.contig = contig.to_string();
    }

    pub fn set_truncation(&mut self, n: usize) {
        self.truncation = n;
        self.derive_headers();
    }

    pub fn truncation(&self) -> usize {
        self.truncation
    }

    pub fn set_parent_sequence(&mut self, parent: &str) {
        self.parent_sequence = parent.to_string();
        self.derive_headers();
    }

    pub fn parent_sequence(&self) -> &str {
        &self.parent_sequence
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn clean_header(&self) -> &str {
        &self.clean_header
    }

    pub fn trunc_header(&self) -> &str {
        &self.trunc_header
    }

    pub fn short_header(&self) -> &str {
        &self.short_header
    }

    pub fn compound_header(&self) -> &str {
        &self.compound_header
    }

    pub fn blast_header(&self) -> &str {
        &self.blast_header
    }

    pub fn sequential_header(&self) -> &str {
        &self.sequential_header
    }

    pub fn custom_header(&self) -> &str {
        &self.custom_header
    }

    fn header_text(&self, kind: HeaderKind) -> &str {
        match kind {
            HeaderKind::Full => &self.header,
            HeaderKind::Clean => &self.clean_header,
            HeaderKind::Trunc => &self.trunc_header,
            HeaderKind::Short => &self.short_header,
            HeaderKind::Compound => &self.compound_header,
            HeaderKind::Blast => &self.blast_header,
            HeaderKind::Sequential => &self.sequential_header,
            HeaderKind::Custom => &self.custom_header,
        }
    }

    /// The requested header variant, with the leading '>'.
    pub fn get_header(&self, kind: HeaderKind) -> String {
        format!("{}{}", RECORD_MARKER, self.header_text(kind))
    }

    /// Like `get_header()`, but the kind is given by name. Returns `None` for a name that is not
    /// a header kind.
    pub fn get_header_by_name(&self, kind: &str) -> Option<String> {
        match kind.parse::<HeaderKind>() {
            Ok(k) => Some(self.get_header(k)),
            Err(_) => {
                if self.verbosity.warnings {
                    warn!(
                        "Invalid header type: {} -- choose full, clean, trunc, short, compound, \
                         blast, sequential or custom",
                        kind
                    );
                }
                None
            }
        }
    }

    /// Removes the "_1" suffix that EMBOSS appends to translated sequence names.
    pub fn remove_emboss_postfix(&mut self) {
        let trimmed = self.header.trim_end();
        let stripped = trimmed.strip_suffix("_1").unwrap_or(trimmed).to_string();
        self.assign_header(&stripped);
    }

    // Order and molecule type both feed the sequential header.

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn set_order(&mut self, order: usize) {
        self.order = order;
        self.refresh_sequential_header();
    }

    pub fn molecule_type(&self) -> MoleculeType {
        self.molecule_type
    }

    pub fn set_molecule_type(&mut self, molecule_type: MoleculeType) {
        self.molecule_type = molecule_type;
        self.refresh_sequential_header();
    }

    // Sequence

    pub fn assign_sequence(&mut self, seq: &str) {
        self.store_sequence(seq.chars());
    }

    pub fn assign_sequence_lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        self.store_sequence(lines.iter().flat_map(|l| l.as_ref().chars()));
    }

    fn store_sequence<I: Iterator<Item = char>>(&mut self, raw: I) {
        let mut dropped = 0;
        let sequence: String = raw
            .filter(|c| {
                let keep = keep_residue(*c);
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .flat_map(char::to_lowercase)
            .collect();
        if self.verbosity.clean_raw_data && dropped > 0 {
            debug!(
                "{}: removed {} whitespace, digit or '*' character(s) from the raw sequence",
                self.header, dropped
            );
        }
        self.sequence = sequence;
    }

    pub fn assign_type(&mut self, label: &str) {
        self.seq_type = SeqType::from_label(label);
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn sequence_len(&self) -> usize {
        self.sequence.len()
    }

    /// Slice `[start, end)` of the sequence (0-based). Out-of-range indices are clamped; an
    /// empty or inverted range gives "".
    pub fn get_subsequence(&self, start: usize, end: usize) -> &str {
        let end = end.min(self.sequence.len());
        if start >= end {
            return "";
        }
        self.sequence.get(start..end).unwrap_or("")
    }

    /// The sequence cut into lines of at most `line_len` characters.
    pub fn split_to_lines(&self, line_len: usize) -> Vec<&str> {
        if line_len == 0 {
            return vec![self.sequence.as_str()];
        }
        let mut lines = Vec::with_capacity(self.sequence.len() / line_len + 1);
        let mut rest = self.sequence.as_str();
        while !rest.is_empty() {
            let cut = rest
                .char_indices()
                .nth(line_len)
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            let (line, tail) = rest.split_at(cut);
            lines.push(line);
            rest = tail;
        }
        lines
    }

    /// First three residues, or `None` for an empty sequence.
    pub fn get_start_codon(&self) -> Option<&str> {
        if self.sequence.is_empty() {
            return None;
        }
        let end = self
            .sequence
            .char_indices()
            .nth(3)
            .map(|(i, _)| i)
            .unwrap_or(self.sequence.len());
        Some(&self.sequence[..end])
    }

    pub fn verify_prokaryotic_start_codon(&self) -> Result<StartCodonClass, SeqError> {
        let codon = self.get_start_codon().ok_or(SeqError::EmptySequence)?;
        Ok(StartCodonClass::classify(codon))
    }

    /// Returns a copy of the sequence in which every (non-overlapping) start codon is upper-case.
    /// Also records how many there are and where they start. The stored sequence is not changed.
    pub fn highlight_all_start_codons(&mut self) -> String {
        self.start_codon_count = 0;
        self.codon_start_locs.clear();
        if self.sequence.is_empty() {
            return String::new();
        }
        let mut highlighted = String::with_capacity(self.sequence.len());
        let mut locs = Vec::new();
        let mut last = 0;
        for m in start_codon_re().find_iter(&self.sequence) {
            highlighted.push_str(&self.sequence[last..m.start()]);
            highlighted.push_str(&m.as_str().to_uppercase());
            locs.push(m.start());
            last = m.end();
        }
        highlighted.push_str(&self.sequence[last..]);
        self.start_codon_count = locs.len();
        self.codon_start_locs = locs;
        highlighted
    }

    pub fn start_codon_count(&self) -> usize {
        self.start_codon_count
    }

    pub fn codon_start_locs(&self) -> &[usize] {
        &self.codon_start_locs
    }

    /// Replaces the sequence by its reverse complement. Only nucleotide records can be
    /// reverse-complemented; for anything else this returns false and changes nothing.
    pub fn reverse_complement(&mut self) -> bool {
        if self.seq_type != SeqType::Nt {
            debug!(
                "Not reverse-complementing {}: sequence type is {}",
                self.header, self.seq_type
            );
            return false;
        }
        self.sequence = self.sequence.chars().rev().map(complement).collect();
        true
    }

    // Related data

    pub fn add_annotation(&mut self, annotation: Rc<dyn Annotation>) {
        self.annotations.push(annotation);
    }

    pub fn set_annotations(&mut self, annotations: Vec<Rc<dyn Annotation>>) {
        self.annotations = annotations;
    }

    pub fn annotations(&self) -> &[Rc<dyn Annotation>] {
        &self.annotations
    }

    pub fn add_paralog(&mut self, paralog: Paralog) {
        self.paralogs.push(paralog);
    }

    pub fn paralogs(&self) -> &[Paralog] {
        &self.paralogs
    }

    pub fn add_pvog_association(&mut self, pvog: &str) {
        self.pvog_associations.push(pvog.to_string());
    }

    pub fn pvog_associations(&self) -> &[String] {
        &self.pvog_associations
    }

    /// Populates a gene, protein (or any other kind of) record in one go. The header is assigned
    /// last, so that the derived headers see the new order, molecule type and parent.
    pub fn enter_data(&mut self, molecule_type: MoleculeType, data: RecordData) {
        self.molecule_type = molecule_type;
        if let Some(name) = data.name {
            self.name = name;
        }
        if let Some(seq) = data.sequence {
            self.assign_sequence(&seq);
        }
        if let Some(seq_type) = data.seq_type {
            self.seq_type = seq_type;
        }
        if let Some(start) = data.start {
            self.start = start;
        }
        if let Some(end) = data.end {
            self.end = end;
        }
        if let Some(strand) = data.strand {
            self.strand = strand;
        }
        if let Some(parent) = data.parent_sequence {
            self.parent_sequence = parent;
        }
        if let Some(parent_name) = data.parent_name {
            self.parent_name = parent_name;
        }
        if let Some(parent_start) = data.parent_start {
            self.parent_start = parent_start;
        }
        if let Some(parent_end) = data.parent_end {
            self.parent_end = parent_end;
        }
        if let Some(parent_strand) = data.parent_strand {
            self.parent_strand = parent_strand;
        }
        if let Some(order) = data.order {
            self.order = order;
        }
        match data.header {
            Some(hdr) => self.assign_header(&hdr),
            None => self.derive_headers(),
        }
    }

    fn is_protein_like(&self) -> bool {
        self.molecule_type.is_protein_like() || self.seq_type == SeqType::Aa
    }

    // Output. None of these close (or even flush) the writer.

    pub fn write_fasta<W: Write>(&self, w: &mut W, kind: HeaderKind) -> Result<(), SeqError> {
        writeln!(w, "{}", self.get_header(kind))?;
        writeln!(w, "{}", self.sequence)?;
        Ok(())
    }

    /// Same as `write_fasta()`, but the sequence line (and only that line) is case-folded.
    pub fn write_fasta_case<W: Write>(
        &self,
        w: &mut W,
        case: Case,
        kind: HeaderKind,
    ) -> Result<(), SeqError> {
        writeln!(w, "{}", self.get_header(kind))?;
        writeln!(w, "{}", case.apply(&self.sequence))?;
        Ok(())
    }

    pub fn write_fasta_wrapped<W: Write>(
        &self,
        w: &mut W,
        kind: HeaderKind,
        line_len: usize,
    ) -> Result<(), SeqError> {
        writeln!(w, "{}", self.get_header(kind))?;
        for line in self.split_to_lines(line_len) {
            writeln!(w, "{}", line)?;
        }
        Ok(())
    }

    pub fn write_headers<W: Write>(&self, w: &mut W) -> Result<(), SeqError> {
        writeln!(w, "header: {}", self.header)?;
        writeln!(w, "cleanHeader: {}", self.clean_header)?;
        writeln!(w, "truncHeader: {}", self.trunc_header)?;
        writeln!(w, "shortHeader: {}", self.short_header)?;
        writeln!(w, "compoundHeader: {}", self.compound_header)?;
        writeln!(w, "blastHeader: {}", self.blast_header)?;
        writeln!(w, "sequentialHeader: {}", self.sequential_header)?;
        writeln!(w, "customHeader: {}", self.custom_header)?;
        Ok(())
    }

    fn tab_line(&self) -> String {
        format!(
            "Header:{}\tName:{}\tType:{}\tOrder:{}",
            self.header, self.name, self.seq_type, self.order
        )
    }

    fn write_tab_body<W: Write>(&self, w: &mut W) -> Result<(), SeqError> {
        match self.annotations.first() {
            Some(first) => {
                writeln!(w, "{}", first.tab_header())?;
                for annot in &self.annotations {
                    writeln!(w, "{}", annot.tab_row())?;
                }
            }
            None => writeln!(w, "{}", NO_ANNOTATIONS)?,
        }
        if self.sequence.len() < TAB_MAX_SEQ_LEN {
            writeln!(w, "{}", self.sequence)?;
        } else {
            writeln!(w, "{}", TAB_SEQ_TOO_LONG)?;
        }
        Ok(())
    }

    pub fn write_tab<W: Write>(&self, w: &mut W) -> Result<(), SeqError> {
        writeln!(w, "{}", self.tab_line())?;
        self.write_tab_body(w)
    }

    /// As `write_tab()`, with position on the parent and length added to the first line.
    pub fn write_tab_detailed<W: Write>(&self, w: &mut W) -> Result<(), SeqError> {
        writeln!(
            w,
            "{}\tparent:{}/{}/{}/{}\tlength: {}",
            self.tab_line(),
            self.start,
            self.end,
            self.strand,
            self.parent_name,
            self.sequence.len()
        )?;
        self.write_tab_body(w)
    }

    pub fn write_all<W: Write>(&self, w: &mut W) -> Result<(), SeqError> {
        writeln!(w, "Header:{}", self.header)?;
        writeln!(w, "ShortHeader:{}", self.short_header)?;
        writeln!(w, "TruncHeader:{}", self.trunc_header)?;
        writeln!(w, "BlastHeader:{}", self.blast_header)?;
        writeln!(w, "SequentialHeader:{}", self.sequential_header)?;
        writeln!(w, "Type:{}", self.seq_type)?;
        writeln!(w, "Order in list:{}", self.order)?;
        writeln!(w, "Sequence length is:{}", self.sequence.len())?;
        if !self.annotations.is_empty() {
            writeln!(w, "Annotation Set No.1:")?;
            for (i, annot) in self.annotations.iter().enumerate() {
                writeln!(w, "Annotation item {}", i + 1)?;
                writeln!(w, "{}", annot.describe())?;
            }
        }
        for (i, paralog) in self.paralogs.iter().enumerate() {
            writeln!(w, "Paralog No.{}: {} {}", i + 1, paralog.header, paralog.hit)?;
        }
        writeln!(w, "Sequence:{}", self.sequence)?;
        Ok(())
    }

    /// Writes one GFF3 row for this record. Protein-like records (and any record written as a
    /// CDS) take their coordinates from the parent gene; genes use their own.
    pub fn write_gff<W: Write>(
        &self,
        w: &mut W,
        feature: GffFeature,
        contig_name: &str,
    ) -> Result<(), SeqError> {
        let protein_like = self.is_protein_like();
        let (gff_type, start, end) = if protein_like || feature == GffFeature::Cds {
            (GffFeature::Cds, self.parent_start, self.parent_end)
        } else {
            (GffFeature::Gene, self.start, self.end)
        };
        let id = gff::escape_attribute(&self.header);
        let id = if protein_like {
            format!("ID={}_cds", id)
        } else {
            format!("ID={}", id)
        };
        let attributes = std::iter::once(id)
            .chain(
                self.annotations
                    .iter()
                    .enumerate()
                    .map(|(i, a)| format!("annot{}={}", i + 1, a.gff_attribute())),
            )
            .join(";");
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            contig_name,
            GFF_SOURCE,
            gff_type,
            start,
            end,
            GFF_SCORE,
            self.strand,
            GFF_PHASE,
            attributes
        )?;
        Ok(())
    }
}

fn keep_residue(c: char) -> bool {
    !(c.is_whitespace() || c.is_ascii_digit() || c == '*')
}

// Lower-case, without white space, digits or '*'.
pub fn normalize_sequence(raw: &str) -> String {
    raw.chars()
        .filter(|c| keep_residue(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

// IUPAC-aware nucleotide complement (lower case in, lower case out). Gaps and unknown symbols are
// left alone.
fn complement(base: char) -> char {
    match base {
        'a' => 't',
        't' | 'u' => 'a',
        'c' => 'g',
        'g' => 'c',
        'r' => 'y',
        'y' => 'r',
        'k' => 'm',
        'm' => 'k',
        'b' => 'v',
        'v' => 'b',
        'd' => 'h',
        'h' => 'd',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::annotation::AnnotationRecord;

    fn nt_record(seq: &str) -> SeqRecord {
        SeqRecord::from_parts(">seq1", seq, SeqType::Nt)
    }

    fn written<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<(), SeqError>,
    {
        let mut buf: Vec<u8> = Vec::new();
        f(&mut buf).expect("write to Vec");
        String::from_utf8(buf).expect("utf-8")
    }

    #[test]
    fn test_assign_header_variants() {
        let mut rec = SeqRecord::new();
        rec.assign_header(">NC_001416.1 Enterobacteria phage lambda (complete)");
        assert_eq!(rec.header(), "NC_001416.1 Enterobacteria phage lambda (complete)");
        assert_eq!(rec.blast_header(), "NC_001416.1");
        assert_eq!(rec.short_header(), "NC_001416.1");
        assert_eq!(rec.trunc_header(), "NC_001416.1 Ent");
        assert_eq!(
            rec.clean_header(),
            "NC_0014161_Enterobacteria_phage_lambda_complete"
        );
        assert_eq!(rec.compound_header(), rec.header());
        assert_eq!(rec.sequential_header(), "unknown-0");
    }

    #[test]
    fn test_short_header_falls_back_to_trunc() {
        let mut rec = SeqRecord::new();
        rec.assign_header("> starts with a space and goes on");
        assert_eq!(rec.short_header(), " starts with a ");
        assert_eq!(rec.short_header(), rec.trunc_header());
    }

    #[test]
    fn test_blast_header_with_leading_whitespace() {
        let mut rec = SeqRecord::new();
        rec.assign_header("> lead space");
        assert_eq!(rec.header(), " lead space");
        assert_eq!(rec.blast_header(), "");
        // No leading token, so both fall back the same way.
        assert_eq!(rec.short_header(), rec.trunc_header());

        rec.assign_header(">lead space");
        assert_eq!(rec.blast_header(), "lead");
        assert_eq!(rec.short_header(), rec.blast_header());
    }

    #[test]
    fn test_assign_header_idempotent() {
        let mut rec = SeqRecord::new();
        rec.assign_header(">gene_7 putative; terminase");
        let first = (
            rec.get_header(HeaderKind::Clean),
            rec.get_header(HeaderKind::Short),
            rec.get_header(HeaderKind::Trunc),
            rec.get_header(HeaderKind::Compound),
        );
        rec.assign_header(">gene_7 putative; terminase");
        let second = (
            rec.get_header(HeaderKind::Clean),
            rec.get_header(HeaderKind::Short),
            rec.get_header(HeaderKind::Trunc),
            rec.get_header(HeaderKind::Compound),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_reassigning_header_rederives_everything() {
        let mut rec = SeqRecord::new();
        rec.assign_header("old header");
        rec.assign_header("new");
        assert_eq!(rec.short_header(), "new");
        assert_eq!(rec.blast_header(), "new");
        assert_eq!(rec.clean_header(), "new");
        assert_eq!(rec.compound_header(), "new");
    }

    #[test]
    fn test_compound_header_with_parent() {
        let mut rec = SeqRecord::new();
        rec.set_parent_sequence("contig_3");
        rec.assign_header(">gene_1");
        assert_eq!(rec.get_header(HeaderKind::Compound), ">gene_1_contig_3");
        let clean = rec.clean_header().to_string();
        rec.assign_compound_header(&clean, "phage");
        assert_eq!(rec.compound_header(), "phage_gene_1");
    }

    #[test]
    fn test_get_header_by_name() {
        let rec = SeqRecord::from_parts("abc def", "acgt", SeqType::Nt);
        assert_eq!(rec.get_header_by_name("BLAST"), Some(String::from(">abc")));
        assert_eq!(rec.get_header_by_name("full"), Some(String::from(">abc def")));
        assert_eq!(rec.get_header_by_name("medium"), None);
    }

    #[test]
    fn test_truncation() {
        let mut rec = SeqRecord::new();
        rec.assign_header("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(rec.trunc_header(), "abcdefghijklmno");
        rec.set_truncation(4);
        assert_eq!(rec.trunc_header(), "abcd");
    }

    #[test]
    fn test_sequential_header_tracks_order() {
        let mut rec = SeqRecord::new();
        rec.set_molecule_type(MoleculeType::Gene);
        rec.set_order(4);
        assert_eq!(rec.get_header(HeaderKind::Sequential), ">gene-4");
    }

    #[test]
    fn test_remove_emboss_postfix() {
        let mut rec = SeqRecord::new();
        rec.assign_header("prot_12_1 ");
        rec.remove_emboss_postfix();
        assert_eq!(rec.header(), "prot_12");
        assert_eq!(rec.short_header(), "prot_12");
    }

    #[test]
    fn test_assign_sequence_normalizes() {
        let mut rec = SeqRecord::new();
        rec.assign_sequence("  1 ACGT acgt\t60 NNN*\n");
        assert_eq!(rec.sequence(), "acgtacgtnnn");
    }

    #[test]
    fn test_clean_raw_data_only_affects_logging() {
        let verbosity = Verbosity {
            clean_raw_data: true,
            ..Verbosity::quiet()
        };
        let mut rec = SeqRecord::with_verbosity(verbosity);
        rec.assign_sequence("  1 ACGT acgt\t60 NNN*\n");
        assert_eq!(rec.sequence(), normalize_sequence("  1 ACGT acgt\t60 NNN*\n"));
        assert_eq!(rec.sequence(), "acgtacgtnnn");
    }

    #[test]
    fn test_assign_sequence_lines() {
        let mut rec = SeqRecord::new();
        rec.assign_sequence_lines(&["ATG CCC", "aaa 12", "TAA*"]);
        assert_eq!(rec.sequence(), "atgcccaaataa");
    }

    #[test]
    fn test_get_subsequence() {
        let rec = nt_record("atgcccaaa");
        assert_eq!(rec.get_subsequence(0, 3), "atg");
        assert_eq!(rec.get_subsequence(6, 100), "aaa");
        assert_eq!(rec.get_subsequence(20, 30), "");
        assert_eq!(rec.get_subsequence(5, 2), "");
    }

    #[test]
    fn test_split_to_lines() {
        let rec = nt_record("acgtacgtac");
        assert_eq!(rec.split_to_lines(4), vec!["acgt", "acgt", "ac"]);
        assert_eq!(rec.split_to_lines(0), vec!["acgtacgtac"]);
        assert!(nt_record("").split_to_lines(4).is_empty());
    }

    #[test]
    fn test_start_codon() {
        assert_eq!(nt_record("atgcccaaa").get_start_codon(), Some("atg"));
        assert_eq!(nt_record("at").get_start_codon(), Some("at"));
        assert_eq!(nt_record("").get_start_codon(), None);
    }

    #[test]
    fn test_verify_start_codon() {
        let cases = [
            ("atgcccaaa", StartCodonClass::Common),
            ("gtgcccaaa", StartCodonClass::Alternate),
            ("ttgcccaaa", StartCodonClass::Alternate),
            ("attcccaaa", StartCodonClass::Rare),
            ("ctgcccaaa", StartCodonClass::Rare),
            ("cccaaaaaa", StartCodonClass::Incorrect),
        ];
        for (seq, class) in cases {
            assert_eq!(nt_record(seq).verify_prokaryotic_start_codon().unwrap(), class);
        }
        assert!(matches!(
            nt_record("").verify_prokaryotic_start_codon(),
            Err(SeqError::EmptySequence)
        ));
    }

    #[test]
    fn test_highlight_all_start_codons() {
        let mut rec = nt_record("aaatgcccatg");
        let hl = rec.highlight_all_start_codons();
        assert_eq!(hl, "aaATGcccATG");
        assert_eq!(hl.len(), rec.sequence_len());
        assert_eq!(rec.start_codon_count(), 2);
        assert_eq!(rec.codon_start_locs(), &[2, 8]);
        assert_eq!(rec.sequence(), "aaatgcccatg");
    }

    #[test]
    fn test_highlight_no_overlap() {
        let mut rec = nt_record("atgatg");
        assert_eq!(rec.highlight_all_start_codons(), "ATGATG");
        assert_eq!(rec.codon_start_locs(), &[0, 3]);
    }

    #[test]
    fn test_highlight_resets_after_sequence_cleared() {
        let mut rec = nt_record("atgcatg");
        rec.highlight_all_start_codons();
        assert_eq!(rec.start_codon_count(), 2);
        rec.assign_sequence("");
        assert_eq!(rec.highlight_all_start_codons(), "");
        assert_eq!(rec.start_codon_count(), 0);
        assert!(rec.codon_start_locs().is_empty());
    }

    #[test]
    fn test_reverse_complement() {
        let mut rec = nt_record("atgc");
        assert!(rec.reverse_complement());
        assert_eq!(rec.sequence(), "gcat");

        let mut rec = nt_record("aacgryn-");
        assert!(rec.reverse_complement());
        assert_eq!(rec.sequence(), "-nrycgtt");

        let mut prot = SeqRecord::from_parts("p1", "mkv", SeqType::Aa);
        assert!(!prot.reverse_complement());
        assert_eq!(prot.sequence(), "mkv");
    }

    #[test]
    fn test_enter_data_gene() {
        let mut rec = SeqRecord::new();
        rec.enter_data(
            MoleculeType::Gene,
            RecordData {
                header: Some(String::from("gene_2 hypothetical")),
                name: Some(String::from("glimmer_2")),
                sequence: Some(String::from("ATG aaa TAA")),
                seq_type: Some(SeqType::Nt),
                start: Some(100),
                end: Some(108),
                strand: Some(Strand::Forward),
                parent_sequence: Some(String::from("contig_1")),
                order: Some(2),
                ..RecordData::default()
            },
        );
        assert_eq!(rec.molecule_type(), MoleculeType::Gene);
        assert_eq!(rec.name, "glimmer_2");
        assert_eq!(rec.sequence(), "atgaaataa");
        assert_eq!(rec.start, 100);
        assert_eq!(rec.parent_start, 0);
        assert_eq!(rec.sequential_header(), "gene-2");
        assert_eq!(rec.compound_header(), "gene_2 hypothetical_contig_1");
    }

    #[test]
    fn test_enter_data_keeps_absent_fields() {
        let mut rec = SeqRecord::from_parts("p1", "mkv", SeqType::Aa);
        rec.enter_data(
            MoleculeType::Protein,
            RecordData {
                parent_start: Some(10),
                parent_end: Some(19),
                ..RecordData::default()
            },
        );
        assert_eq!(rec.header(), "p1");
        assert_eq!(rec.sequence(), "mkv");
        assert_eq!(rec.seq_type, SeqType::Aa);
        assert_eq!(rec.parent_end, 19);
        assert_eq!(rec.sequential_header(), "protein-0");
    }

    #[test]
    fn test_write_fasta_kinds() {
        let rec = SeqRecord::from_parts(">abc def", "ACGT", SeqType::Nt);
        let out = written(|w| rec.write_fasta(w, HeaderKind::Short));
        assert_eq!(out, ">abc\nacgt\n");
        let out = written(|w| rec.write_fasta(w, HeaderKind::Full));
        assert_eq!(out, ">abc def\nacgt\n");
    }

    #[test]
    fn test_write_fasta_case_leaves_header() {
        let rec = SeqRecord::from_parts(">Abc def", "acgt", SeqType::Nt);
        let out = written(|w| rec.write_fasta_case(w, Case::Upper, HeaderKind::Full));
        assert_eq!(out, ">Abc def\nACGT\n");
    }

    #[test]
    fn test_write_fasta_wrapped() {
        let rec = SeqRecord::from_parts("s", "acgtacgtac", SeqType::Nt);
        let out = written(|w| rec.write_fasta_wrapped(w, HeaderKind::Short, 4));
        assert_eq!(out, ">s\nacgt\nacgt\nac\n");
    }

    #[test]
    fn test_write_tab() {
        let mut rec = SeqRecord::from_parts("s1 x", "acgt", SeqType::Nt);
        rec.set_order(3);
        let out = written(|w| rec.write_tab(w));
        assert_eq!(
            out,
            "Header:s1 x\tName:none\tType:nt\tOrder:3\nThere are no annotations\nacgt\n"
        );
    }

    #[test]
    fn test_write_tab_long_sequence() {
        let rec = SeqRecord::from_parts("s1", &"a".repeat(TAB_MAX_SEQ_LEN), SeqType::Nt);
        let out = written(|w| rec.write_tab(w));
        assert!(out.ends_with(&format!("{}\n", TAB_SEQ_TOO_LONG)));
    }

    #[test]
    fn test_write_tab_detailed_with_annotations() {
        let mut rec = SeqRecord::from_parts("g1", "atg", SeqType::Nt);
        rec.start = 5;
        rec.end = 7;
        rec.strand = Strand::Reverse;
        rec.parent_name = String::from("contig_1");
        rec.add_annotation(Rc::new(AnnotationRecord::new("NR", "blastp", "homology", "x")));
        rec.add_annotation(Rc::new(AnnotationRecord::new("pVOGs", "hmm", "homology", "y")));
        let out = written(|w| rec.write_tab_detailed(w));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines[0],
            "Header:g1\tName:none\tType:nt\tOrder:0\tparent:5/7/-/contig_1\tlength: 3"
        );
        assert_eq!(lines[1], "Source\tMethod\tType\tName\tDescription");
        assert_eq!(lines[2], "NR\tblastp\thomology\tx\t");
        assert_eq!(lines[3], "pVOGs\thmm\thomology\ty\t");
        assert_eq!(lines[4], "atg");
    }

    #[test]
    fn test_write_gff_gene() {
        let mut rec = SeqRecord::from_parts("gene_1", "atgaaataa", SeqType::Nt);
        rec.set_molecule_type(MoleculeType::Gene);
        rec.start = 10;
        rec.end = 18;
        rec.strand = Strand::Forward;
        rec.add_annotation(Rc::new(AnnotationRecord::new("NR", "blastp", "homology", "x")));
        let out = written(|w| rec.write_gff(w, GffFeature::Gene, "contig_1"));
        assert_eq!(
            out,
            "contig_1\tfastaseq\tgene\t10\t18\t.\t+\t.\tID=gene_1;annot1=NR x\n"
        );
    }

    #[test]
    fn test_write_gff_protein() {
        let mut rec = SeqRecord::from_parts("gene_1", "mk", SeqType::Aa);
        rec.set_molecule_type(MoleculeType::Protein);
        rec.parent_start = 10;
        rec.parent_end = 18;
        let out = written(|w| rec.write_gff(w, GffFeature::Gene, "contig_1"));
        assert_eq!(out, "contig_1\tfastaseq\tCDS\t10\t18\t.\t.\t.\tID=gene_1_cds\n");
    }

    #[test]
    fn test_write_gff_escapes_id() {
        let rec = SeqRecord::from_parts("g=1;x", "atg", SeqType::Nt);
        let out = written(|w| rec.write_gff(w, GffFeature::Gene, "contig_1"));
        let attributes = out.trim_end().rsplit('\t').next().unwrap_or_default();
        assert_eq!(attributes, "ID=g 1 x");
    }

    #[test]
    fn test_equality_uses_annotation_identity() {
        let annot: Rc<dyn Annotation> = Rc::new(AnnotationRecord::default());
        let mut a = nt_record("acgt");
        let mut b = nt_record("acgt");
        assert_eq!(a, b);
        a.add_annotation(Rc::clone(&annot));
        b.add_annotation(Rc::new(AnnotationRecord::default()));
        assert_ne!(a, b);
        let c = a.clone();
        assert_eq!(a, c);
    }
}
