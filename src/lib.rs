pub mod config;
pub mod errors;
mod runner;
pub mod seq;

use crate::errors::SeqError;

pub use crate::config::Verbosity;
pub use crate::seq::annotation::{Annotation, AnnotationRecord};
pub use crate::seq::file::{RecordMetadata, SeqFile};
pub use crate::seq::gff::GffFeature;
pub use crate::seq::header::HeaderKind;
pub use crate::seq::record::{Paralog, RecordData, SeqRecord};
pub use crate::seq::types::{Case, MoleculeType, SeqType, StartCodonClass, Strand};

pub fn run() -> Result<(), SeqError> {
    runner::run()
}
