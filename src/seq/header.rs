// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

// A FASTA header comes in several flavours. Some downstream tools truncate at the first space
// (BLAST, RAST), some choke on punctuation, and some want a short synthetic name. All flavours
// are derived together from the full header so that they can never disagree.

use std::{fmt, str::FromStr, sync::OnceLock};

use clap::ValueEnum;
use log::warn;
use regex::Regex;

use crate::config::Verbosity;
use crate::errors::SeqError;

pub const RECORD_MARKER: char = '>';
pub const DEFAULT_TRUNCATION: usize = 15;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum HeaderKind {
    Full,
    Clean,
    #[clap(name = "trunc")]
    #[clap(alias = "truncated")]
    Trunc,
    #[default]
    Short,
    Compound,
    Blast,
    Sequential,
    Custom,
}

impl HeaderKind {
    /// Lenient parse used by output paths: an unknown name is reported (if warnings are on) and
    /// the short header is used instead.
    pub fn parse_or_short(name: &str, verbosity: &Verbosity) -> Self {
        match name.parse() {
            Ok(kind) => kind,
            Err(_) => {
                if verbosity.warnings {
                    warn!(
                        "Invalid header type: {} -- choose full, clean, trunc, short, compound, \
                         blast, sequential or custom; using short",
                        name
                    );
                }
                HeaderKind::Short
            }
        }
    }
}

impl FromStr for HeaderKind {
    type Err = SeqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(HeaderKind::Full),
            "clean" => Ok(HeaderKind::Clean),
            "trunc" | "truncated" => Ok(HeaderKind::Trunc),
            "short" => Ok(HeaderKind::Short),
            "compound" => Ok(HeaderKind::Compound),
            "blast" => Ok(HeaderKind::Blast),
            "sequential" => Ok(HeaderKind::Sequential),
            "custom" => Ok(HeaderKind::Custom),
            _ => Err(SeqError::InvalidSelector(s.to_string())),
        }
    }
}

impl fmt::Display for HeaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HeaderKind::Full => "full",
            HeaderKind::Clean => "clean",
            HeaderKind::Trunc => "trunc",
            HeaderKind::Short => "short",
            HeaderKind::Compound => "compound",
            HeaderKind::Blast => "blast",
            HeaderKind::Sequential => "sequential",
            HeaderKind::Custom => "custom",
        };
        write!(f, "{}", s)
    }
}

fn punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[();:?.]").expect("valid regex"))
}

fn up_to_space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\S*").expect("valid regex"))
}

/// Removes one leading '>' if present.
pub fn strip_marker(raw: &str) -> &str {
    raw.strip_prefix(RECORD_MARKER).unwrap_or(raw)
}

pub fn is_header_line(line: &str) -> bool {
    line.starts_with(RECORD_MARKER)
}

// Spaces become underscores, then characters that trip up third-party parsers are dropped.
pub fn clean(header: &str) -> String {
    let underscored = header.replace(' ', "_");
    punctuation_re().replace_all(&underscored, "").into_owned()
}

pub fn truncate(header: &str, n: usize) -> String {
    header.chars().take(n).collect()
}

/// Everything before the first whitespace character; empty when the header starts with one.
pub fn blast_token(header: &str) -> &str {
    up_to_space_re().find(header).map_or("", |m| m.as_str())
}

/// Leading run of non-whitespace characters, or `None` when the header is empty or starts with
/// whitespace.
pub fn leading_token(header: &str) -> Option<&str> {
    up_to_space_re()
        .find(header)
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_marker_once() {
        assert_eq!(strip_marker(">seq1"), "seq1");
        assert_eq!(strip_marker(">>seq1"), ">seq1");
        assert_eq!(strip_marker("seq1"), "seq1");
    }

    #[test]
    fn test_clean() {
        assert_eq!(clean("gene 1 (putative); len:300?."), "gene_1_putative_len300");
    }

    #[test]
    fn test_truncate_is_char_based() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 15), "ab");
        assert_eq!(truncate("αβγδ", 2), "αβ");
    }

    #[test]
    fn test_tokens() {
        assert_eq!(blast_token("NC_001416.1 Enterobacteria phage"), "NC_001416.1");
        assert_eq!(leading_token("NC_001416.1 Enterobacteria phage"), Some("NC_001416.1"));
        assert_eq!(leading_token("single\ttab"), Some("single"));
        assert_eq!(leading_token(" leading space"), None);
        assert_eq!(blast_token(" leading space"), "");
        assert_eq!(blast_token("tab\tseparated"), "tab");
        assert_eq!(leading_token(""), None);
    }

    #[test]
    fn test_header_kind_parse() {
        assert_eq!("TRUNCATED".parse::<HeaderKind>().unwrap(), HeaderKind::Trunc);
        assert_eq!("Sequential".parse::<HeaderKind>().unwrap(), HeaderKind::Sequential);
        assert!(matches!(
            "medium".parse::<HeaderKind>(),
            Err(SeqError::InvalidSelector(_))
        ));
    }

    #[test]
    fn test_parse_or_short() {
        let v = Verbosity::quiet();
        assert_eq!(HeaderKind::parse_or_short("blast", &v), HeaderKind::Blast);
        assert_eq!(HeaderKind::parse_or_short("medium", &v), HeaderKind::Short);
    }
}
