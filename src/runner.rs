// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{
    collections::HashMap,
    fmt, fs,
    io::{stdout, BufWriter, Write},
    path::Path,
    rc::Rc,
};

use clap::{Parser, ValueEnum};
use log::{info, warn};

use crate::config::{find_config, Verbosity};
use crate::errors::SeqError;
use crate::seq::annotation::AnnotationRecord;
use crate::seq::fasta::read_fasta_file;
use crate::seq::file::SeqFile;
use crate::seq::gff::{GffFeature, GFF_VERSION_PRAGMA};
use crate::seq::header::HeaderKind;
use crate::seq::types::{Case, MoleculeType, SeqType};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None) ]
struct Cli {
    /// Multi-FASTA file
    fasta_fname: String,

    /// Sequence type
    #[arg(short = 't', long = "type", default_value_t = SeqType::Nt)]
    seq_type: SeqType,

    /// Molecule type of the records
    #[arg(short, long, default_value_t = MoleculeType::Unknown)]
    molecule: MoleculeType,

    /// Header variant used for FASTA output
    #[arg(short = 'H', long = "header", default_value_t = HeaderKind::Short)]
    header: HeaderKind,

    /// Output format
    #[arg(short, long = "format", default_value_t = OutputFormat::Fasta,
        help = "Output format [fasta|tab|detailed|all|gff|stats|headers]; default: fasta",
        hide_default_value = true,
        hide_possible_values = true,
    )]
    format: OutputFormat,

    /// Case of the sequence lines (FASTA output only)
    #[arg(short, long)]
    case: Option<Case>,

    /// Wrap sequence lines at this many residues (FASTA output only)
    #[arg(short, long)]
    wrap: Option<usize>,

    /// GFF feature type
    #[arg(long, default_value_t = GffFeature::Gene)]
    feature: GffFeature,

    /// Contig (parent) name: written to GFF column 1 and assigned to every record
    #[arg(long)]
    contig: Option<String>,

    /// JSON file mapping full headers to lists of annotations
    #[arg(short, long)]
    annotations: Option<String>,

    /// Reverse-complement nucleotide records before output
    #[arg(short, long)]
    revcomp: bool,

    /// Upper-case every start codon (FASTA output only)
    #[arg(long)]
    highlight: bool,

    /// JSON config file (default: .fastaseqconfig in $HOME or the current directory)
    #[arg(long)]
    config: Option<String>,

    /// Report progress
    #[arg(long)]
    progress: bool,

    /// Report messages
    #[arg(long)]
    messages: bool,

    /// Report warnings
    #[arg(long)]
    warnings: bool,

    /// Info mode: print file name and number of records, then exit
    #[arg(short, long)]
    info: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    #[clap(name = "fasta")]
    #[clap(alias = "f")]
    Fasta,
    Tab,
    Detailed,
    All,
    Gff,
    Stats,
    Headers,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputFormat::Fasta => "fasta",
            OutputFormat::Tab => "tab",
            OutputFormat::Detailed => "detailed",
            OutputFormat::All => "all",
            OutputFormat::Gff => "gff",
            OutputFormat::Stats => "stats",
            OutputFormat::Headers => "headers",
        };
        write!(f, "{}", s)
    }
}

// Config file, then environment, then command line.
fn resolve_verbosity(cli: &Cli) -> Result<Verbosity, SeqError> {
    let base = match cli.config.as_deref() {
        Some(path) => Verbosity::from_file(path)?,
        None => match find_config() {
            Some(path) => Verbosity::from_file(&path)?,
            None => Verbosity::default(),
        },
    };
    let mut verbosity = base.merge_env();
    verbosity.progress |= cli.progress;
    verbosity.messages |= cli.messages;
    verbosity.warnings |= cli.warnings;
    Ok(verbosity)
}

fn load_annotations<P: AsRef<Path>>(
    path: P,
) -> Result<HashMap<String, Vec<AnnotationRecord>>, SeqError> {
    let text = fs::read_to_string(path)?;
    let map = serde_json::from_str(&text)
        .map_err(|e| SeqError::Format(format!("Bad annotations file: {}", e)))?;
    Ok(map)
}

fn attach_annotations(
    seq_file: &mut SeqFile,
    annotations: HashMap<String, Vec<AnnotationRecord>>,
) {
    let warnings = seq_file.verbosity().warnings;
    for (hdr, annots) in annotations {
        match seq_file.find_by_exact_header_mut(&hdr) {
            Some(rec) => {
                for annot in annots {
                    rec.add_annotation(Rc::new(annot));
                }
            }
            None => {
                if warnings {
                    warn!("Annotations given for unknown header: {}", hdr);
                }
            }
        }
    }
}

fn write_output<W: Write>(w: &mut W, cli: &Cli, seq_file: &mut SeqFile) -> Result<(), SeqError> {
    match cli.format {
        OutputFormat::Fasta => {
            if cli.highlight {
                for rec in seq_file.iter_mut() {
                    let highlighted = rec.highlight_all_start_codons();
                    writeln!(w, "{}", rec.get_header(cli.header))?;
                    writeln!(w, "{}", highlighted)?;
                }
            } else if let Some(line_len) = cli.wrap {
                seq_file.write_fasta_wrapped(w, cli.header, line_len)?;
            } else if let Some(case) = cli.case {
                seq_file.write_fasta_case(w, case, cli.header)?;
            } else {
                seq_file.write_fasta(w, cli.header)?;
            }
        }
        OutputFormat::Tab => seq_file.write_tab(w)?,
        OutputFormat::Detailed => seq_file.write_tab_detailed(w)?,
        OutputFormat::All => seq_file.write_all(w)?,
        OutputFormat::Gff => {
            writeln!(w, "{}", GFF_VERSION_PRAGMA)?;
            let contig = cli.contig.as_deref().unwrap_or(&seq_file.contig).to_string();
            seq_file.write_gff(w, cli.feature, &contig)?;
        }
        OutputFormat::Stats => {
            for line in seq_file.report_stats() {
                writeln!(w, "{}", line)?;
            }
        }
        OutputFormat::Headers => {
            for rec in seq_file.iter() {
                rec.write_headers(w)?;
            }
        }
    }
    Ok(())
}

pub fn run() -> Result<(), SeqError> {
    let cli = Cli::parse();
    let verbosity = resolve_verbosity(&cli)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(verbosity.log_level().to_string()),
    )
    .init();
    info!("Starting log");

    if verbosity.progress {
        info!("Reading {}", cli.fasta_fname);
    }
    let mut seq_file = read_fasta_file(&cli.fasta_fname, cli.seq_type, verbosity)?;
    seq_file.assign_molecule_type(cli.molecule);

    if let Some(contig) = &cli.contig {
        seq_file.assign_contig(contig);
        seq_file.assign_contig_to_all(contig);
        seq_file.assign_parent(contig);
    }

    if cli.info {
        println!("name: {}", seq_file.filename);
        println!("nb_sequences: {}", seq_file.len());
        println!();
        return Ok(());
    }

    if let Some(path) = &cli.annotations {
        let annotations = load_annotations(path)?;
        attach_annotations(&mut seq_file, annotations);
    }

    if cli.revcomp {
        for rec in seq_file.iter_mut() {
            if !rec.reverse_complement() && verbosity.warnings {
                warn!("Not a nucleotide record, left as is: {}", rec.header());
            }
        }
    }

    let out = stdout();
    let mut w = BufWriter::new(out.lock());
    write_output(&mut w, &cli, &mut seq_file)?;
    w.flush()?;

    if verbosity.progress {
        info!("Wrote {} record(s)", seq_file.len());
    }
    Ok(())
}
