//! Utilities for biological sequence data.
//!
//! The centrepiece is [`FastqFilter`], which selects parsed FASTQ reads by
//! GC content, length and mean Phred+33 quality. Alongside it live:
//! 1. Per-read metrics (`gc_content`, `seq_length`, `mean_quality_offset`).
//! 2. A DNA/RNA toolkit (transcription, complement, reverse complement).
//! 3. A protein toolkit (pI lookup, residue frequency, three-letter codes,
//!    monoisotopic mass, back-translation to RNA).
//!
//! Lookup tables are plain values built once and borrowed by the toolkits.

// Modules defined within the project
pub mod bio;
pub mod config;
pub mod pipeline;
pub mod utils;

pub use crate::bio::{
    gc_content, mean_quality_offset, seq_length, NucleicAcidTools, NucleotideTables,
    ProteinTables, ProteinTools, SeqError,
};
pub use crate::pipeline::{
    generate_report, Bounds, FastqFilter, FastqRecords, FilterCriteria, FilterError,
    FilterMetrics, FilterOutcome, SequenceRecord,
};
