// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::{fmt, str::FromStr};

use clap::ValueEnum;

use crate::errors::SeqError;

/// Residue alphabet of a sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SeqType {
    #[clap(name = "nt")]
    Nt,
    #[clap(name = "aa")]
    Aa,
    #[default]
    #[value(skip)]
    Unknown,
}

impl SeqType {
    // Never fails: labels we don't know map to Unknown.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "nt" | "nucl" | "nucleotide" => SeqType::Nt,
            "aa" | "amino-acid" | "protein" | "peptide" => SeqType::Aa,
            _ => SeqType::Unknown,
        }
    }
}

impl FromStr for SeqType {
    type Err = SeqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SeqType::from_label(s))
    }
}

impl fmt::Display for SeqType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SeqType::Nt => "nt",
            SeqType::Aa => "aa",
            SeqType::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// What kind of biological object a record stands for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MoleculeType {
    Contig,
    Gene,
    Protein,
    Peptide,
    #[default]
    Unknown,
}

impl MoleculeType {
    pub fn is_protein_like(&self) -> bool {
        matches!(self, MoleculeType::Protein | MoleculeType::Peptide)
    }
}

impl FromStr for MoleculeType {
    type Err = SeqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "contig" => Ok(MoleculeType::Contig),
            "gene" => Ok(MoleculeType::Gene),
            "protein" => Ok(MoleculeType::Protein),
            "peptide" => Ok(MoleculeType::Peptide),
            "unknown" => Ok(MoleculeType::Unknown),
            _ => Err(SeqError::InvalidSelector(s.to_string())),
        }
    }
}

impl fmt::Display for MoleculeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MoleculeType::Contig => "contig",
            MoleculeType::Gene => "gene",
            MoleculeType::Protein => "protein",
            MoleculeType::Peptide => "peptide",
            MoleculeType::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
    #[default]
    Unknown,
}

impl FromStr for Strand {
    type Err = SeqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" | "+1" | "1" => Ok(Strand::Forward),
            "-" | "-1" => Ok(Strand::Reverse),
            "" | "." | "?" => Ok(Strand::Unknown),
            _ => Err(SeqError::InvalidSelector(s.to_string())),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
            Strand::Unknown => '.',
        };
        write!(f, "{}", c)
    }
}

/// Case applied to the sequence line on output. Headers are never case-folded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Case {
    Upper,
    Lower,
}

impl Case {
    pub fn apply(&self, s: &str) -> String {
        match self {
            Case::Upper => s.to_uppercase(),
            Case::Lower => s.to_lowercase(),
        }
    }
}

impl FromStr for Case {
    type Err = SeqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upper" => Ok(Case::Upper),
            "lower" => Ok(Case::Lower),
            _ => Err(SeqError::InvalidSelector(s.to_string())),
        }
    }
}

// Prokaryotic start codon usage, from the canonical ATG down to codons that are almost never
// used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartCodonClass {
    Common,
    Alternate,
    Rare,
    Incorrect,
}

impl StartCodonClass {
    pub fn classify(codon: &str) -> Self {
        match codon.to_lowercase().as_str() {
            "atg" => StartCodonClass::Common,
            "gtg" | "ttg" => StartCodonClass::Alternate,
            "att" | "ctg" => StartCodonClass::Rare,
            _ => StartCodonClass::Incorrect,
        }
    }
}

impl fmt::Display for StartCodonClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StartCodonClass::Common => "common",
            StartCodonClass::Alternate => "alternate",
            StartCodonClass::Rare => "rare",
            StartCodonClass::Incorrect => "incorrect",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_type_synonyms() {
        for label in ["nt", "NUCL", "Nucleotide"] {
            assert_eq!(SeqType::from_label(label), SeqType::Nt);
        }
        for label in ["aa", "Amino-Acid", "protein", "PEPTIDE"] {
            assert_eq!(SeqType::from_label(label), SeqType::Aa);
        }
        assert_eq!(SeqType::from_label("dna"), SeqType::Unknown);
        assert_eq!("rna".parse::<SeqType>().unwrap(), SeqType::Unknown);
    }

    #[test]
    fn test_molecule_type_roundtrip() {
        for m in [
            MoleculeType::Contig,
            MoleculeType::Gene,
            MoleculeType::Protein,
            MoleculeType::Peptide,
            MoleculeType::Unknown,
        ] {
            assert_eq!(m.to_string().parse::<MoleculeType>().unwrap(), m);
        }
        assert!("plasmid".parse::<MoleculeType>().is_err());
    }

    #[test]
    fn test_strand() {
        assert_eq!("+".parse::<Strand>().unwrap(), Strand::Forward);
        assert_eq!("-".parse::<Strand>().unwrap(), Strand::Reverse);
        assert_eq!("".parse::<Strand>().unwrap(), Strand::Unknown);
        assert_eq!(Strand::Unknown.to_string(), ".");
    }

    #[test]
    fn test_classify() {
        assert_eq!(StartCodonClass::classify("ATG"), StartCodonClass::Common);
        assert_eq!(StartCodonClass::classify("ttg"), StartCodonClass::Alternate);
        assert_eq!(StartCodonClass::classify("ctg"), StartCodonClass::Rare);
        assert_eq!(StartCodonClass::classify("at"), StartCodonClass::Incorrect);
    }
}
