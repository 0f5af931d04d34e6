//! Bioinformatics utilities module.
//!
//! Groups together the sequence-level building blocks: alphabet checks,
//! per-read metrics used by the FASTQ filter, and the nucleic-acid and
//! protein toolkits.

pub mod metrics;
pub mod nucleic;
pub mod protein;

pub use metrics::{gc_content, mean_quality_offset, seq_length, PHRED_OFFSET};
pub use nucleic::{NucleicAcidTools, NucleicAction, NucleotideTables};
pub use protein::{ProteinAction, ProteinOutput, ProteinTables, ProteinTools};

use bio::alphabets::{self, Alphabet};
use thiserror::Error;

// --- Error Type ---
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeqError {
    #[error("Empty sequence: GC content is undefined")]
    EmptySequence,

    #[error("Empty quality string: mean quality is undefined")]
    EmptyQuality,

    #[error("Invalid sequence: {0}")]
    InvalidSequence(String),

    #[error("Sequence mixes T and U: {0}")]
    MixedNucleicAcid(String),

    #[error("Sequence is not DNA: {0}")]
    NotDna(String),

    #[error("The sequence is not a protein sequence: {0}")]
    NotProtein(String),

    #[error("No such action: {0}")]
    UnsupportedAction(String),
}

/// Bases accepted by the nucleic-acid toolkit (DNA or RNA).
pub const NUCLEIC_BASES: &[u8] = b"ATGCUatgcu";

/// The FASTQ read alphabet, {A,T,G,C} in either case.
pub fn dna_alphabet() -> Alphabet {
    alphabets::dna::alphabet()
}
