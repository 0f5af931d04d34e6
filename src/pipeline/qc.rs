use crate::bio::{dna_alphabet, gc_content, mean_quality_offset, seq_length};
use crate::pipeline::criteria::{FilterCriteria, FilterError};
use crate::utils::parallel::{parallel_map, ParallelConfig};
use bio::alphabets::Alphabet;
use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Parsed FASTQ reads keyed by identifier: `id -> (sequence, quality)`.
pub type FastqRecords = IndexMap<String, (String, String)>;

// --- Structs (Records, Verdicts, Metrics) ---

/// A single parsed FASTQ read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub id: String,
    pub sequence: String,
    pub quality: String,
}

impl SequenceRecord {
    pub fn new(
        id: impl Into<String>,
        sequence: impl Into<String>,
        quality: impl Into<String>,
    ) -> Self {
        SequenceRecord {
            id: id.into(),
            sequence: sequence.into(),
            quality: quality.into(),
        }
    }
}

/// Why a record was not evaluated at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Sequence contains a character outside {A,T,G,C,a,t,g,c}.
    InvalidBase,
    /// Sequence and quality string differ in length.
    LengthMismatch,
    /// Empty read; GC content and mean quality are undefined.
    Empty,
}

/// The first criterion a record failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    GcContent,
    Length,
    Quality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Rejected(Criterion),
    Skipped(SkipReason),
}

/// Counters for one filter run.
///
/// Every record lands in exactly one bucket: passed, one rejection
/// criterion, or one skip reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterMetrics {
    pub total_records: usize,
    pub passed_records: usize,
    pub rejected_gc: usize,
    pub rejected_length: usize,
    pub rejected_quality: usize,
    pub skipped_invalid: usize,
    pub skipped_mismatch: usize,
    pub skipped_empty: usize,
    pub total_bases: usize,
    pub passed_bases: usize,
}

impl FilterMetrics {
    fn record(&mut self, verdict: Verdict, bases: usize) {
        self.total_records += 1;
        self.total_bases += bases;
        match verdict {
            Verdict::Passed => {
                self.passed_records += 1;
                self.passed_bases += bases;
            }
            Verdict::Rejected(Criterion::GcContent) => self.rejected_gc += 1,
            Verdict::Rejected(Criterion::Length) => self.rejected_length += 1,
            Verdict::Rejected(Criterion::Quality) => self.rejected_quality += 1,
            Verdict::Skipped(SkipReason::InvalidBase) => self.skipped_invalid += 1,
            Verdict::Skipped(SkipReason::LengthMismatch) => self.skipped_mismatch += 1,
            Verdict::Skipped(SkipReason::Empty) => self.skipped_empty += 1,
        }
    }

    pub fn rejected(&self) -> usize {
        self.rejected_gc + self.rejected_length + self.rejected_quality
    }

    pub fn skipped(&self) -> usize {
        self.skipped_invalid + self.skipped_mismatch + self.skipped_empty
    }

    /// Percentage of records that passed.
    pub fn pass_rate(&self) -> f64 {
        100.0 * self.passed_records as f64 / self.total_records.max(1) as f64
    }
}

/// Result of a filter run: the retained `id -> sequence` pairs in input
/// order, plus counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    pub sequences: IndexMap<String, String>,
    pub metrics: FilterMetrics,
}

impl FilterOutcome {
    fn push(&mut self, id: &str, sequence: &str, verdict: Verdict) {
        self.metrics.record(verdict, seq_length(sequence.as_bytes()));
        if verdict == Verdict::Passed {
            self.sequences.insert(id.to_string(), sequence.to_string());
        }
    }
}

// --- FastqFilter ---

/// Selects FASTQ reads by GC content, length and mean quality.
#[derive(Debug, Clone)]
pub struct FastqFilter {
    pub criteria: FilterCriteria,
    pub parallel: ParallelConfig,
    alphabet: Alphabet,
}

impl FastqFilter {
    pub fn new(criteria: FilterCriteria) -> Self {
        FastqFilter {
            criteria,
            parallel: ParallelConfig::default(),
            alphabet: dna_alphabet(),
        }
    }

    /// Overrides the thread and chunk settings used by [`Self::filter_parallel`].
    pub fn with_parallel_config(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Decides the fate of a single read.
    ///
    /// Malformed reads are skipped with a warning rather than returned as
    /// errors, so one bad read never aborts a batch.
    pub fn evaluate(&self, id: &str, sequence: &[u8], quality: &[u8]) -> Verdict {
        if !self.alphabet.is_word(sequence) {
            warn!("Skipping non-DNA sequence: {}", id);
            return Verdict::Skipped(SkipReason::InvalidBase);
        }

        if sequence.len() != quality.len() {
            warn!(
                "Skipping {}: sequence length ({}) and quality length ({}) mismatch",
                id,
                sequence.len(),
                quality.len()
            );
            return Verdict::Skipped(SkipReason::LengthMismatch);
        }

        let (gc, mean_offset) = match (gc_content(sequence), mean_quality_offset(quality)) {
            (Ok(gc), Ok(mean_offset)) => (gc, mean_offset),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Skipping {}: {}", id, e);
                return Verdict::Skipped(SkipReason::Empty);
            }
        };
        let length = seq_length(sequence);

        let criteria = &self.criteria;
        let verdict = if !criteria.gc_bounds().contains(gc) {
            Verdict::Rejected(Criterion::GcContent)
        } else if !criteria.length_bounds().contains(length) {
            Verdict::Rejected(Criterion::Length)
        } else if mean_offset < criteria.quality_threshold() {
            Verdict::Rejected(Criterion::Quality)
        } else {
            Verdict::Passed
        };

        debug!(
            "{}: gc={:.2} length={} mean_quality={:.2} -> {:?}",
            id, gc, length, mean_offset, verdict
        );
        verdict
    }

    /// Filters `id -> (sequence, quality)` pairs, keeping `id -> sequence`
    /// for every read that meets all criteria. Output follows input order.
    pub fn filter<'a, I>(&self, records: I) -> IndexMap<String, String>
    where
        I: IntoIterator<Item = (&'a String, &'a (String, String))>,
    {
        self.filter_with_metrics(records).sequences
    }

    /// Like [`Self::filter`], also returning per-run counters.
    pub fn filter_with_metrics<'a, I>(&self, records: I) -> FilterOutcome
    where
        I: IntoIterator<Item = (&'a String, &'a (String, String))>,
    {
        let mut outcome = FilterOutcome::default();

        for (id, (sequence, quality)) in records {
            let verdict = self.evaluate(id, sequence.as_bytes(), quality.as_bytes());
            outcome.push(id, sequence, verdict);
        }

        debug!(
            "Filter kept {}/{} records ({:.1}%)",
            outcome.metrics.passed_records,
            outcome.metrics.total_records,
            outcome.metrics.pass_rate()
        );
        outcome
    }

    /// Filters full records, keeping their quality strings.
    pub fn filter_records<'a, I>(&self, records: I) -> Vec<SequenceRecord>
    where
        I: IntoIterator<Item = &'a SequenceRecord>,
    {
        records
            .into_iter()
            .filter(|r| {
                self.evaluate(&r.id, r.sequence.as_bytes(), r.quality.as_bytes())
                    == Verdict::Passed
            })
            .cloned()
            .collect()
    }

    /// Evaluates records on a rayon pool.
    ///
    /// Produces exactly what [`Self::filter_with_metrics`] would, including
    /// output order.
    ///
    /// # Returns
    ///
    /// * `Result<FilterOutcome, FilterError>` - Fails only if the thread pool
    ///   cannot be built or the chunk size is zero.
    pub fn filter_parallel(
        &self,
        records: &[SequenceRecord],
    ) -> Result<FilterOutcome, FilterError> {
        let verdicts = parallel_map(
            records,
            |r| self.evaluate(&r.id, r.sequence.as_bytes(), r.quality.as_bytes()),
            Some(self.parallel.clone()),
        )?;

        let mut outcome = FilterOutcome::default();
        for (record, verdict) in records.iter().zip(verdicts) {
            outcome.push(&record.id, &record.sequence, verdict);
        }
        Ok(outcome)
    }
}

impl Default for FastqFilter {
    fn default() -> Self {
        Self::new(FilterCriteria::default())
    }
}
