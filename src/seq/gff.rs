// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::{fmt, str::FromStr};

use clap::ValueEnum;

use crate::errors::SeqError;

// Any column without data gets a '.'
pub const EMPTY_COL: &str = ".";
pub const GFF_SOURCE: &str = "fastaseq";
// Neither hit scores nor phase are reported.
pub const GFF_SCORE: &str = EMPTY_COL;
pub const GFF_PHASE: &str = EMPTY_COL;
pub const GFF_VERSION_PRAGMA: &str = "##gff-version 3";

// GFF reserves ';', '=', tab and newline in column 9.
pub fn escape_attribute(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ';' | '=' | '\t' | '\n' | '\r' => ' ',
            _ => c,
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GffFeature {
    Gene,
    #[clap(name = "cds")]
    #[clap(alias = "CDS")]
    Cds,
}

impl FromStr for GffFeature {
    type Err = SeqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "gene" => Ok(GffFeature::Gene),
            "CDS" | "cds" => Ok(GffFeature::Cds),
            _ => Err(SeqError::InvalidSelector(s.to_string())),
        }
    }
}

impl fmt::Display for GffFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GffFeature::Gene => "gene",
            GffFeature::Cds => "CDS",
        };
        write!(f, "{}", s)
    }
}
