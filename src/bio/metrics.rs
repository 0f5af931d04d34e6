//! Per-read metrics used by the FASTQ filter.
//!
//! All three metrics are single passes over the read. The two averages are
//! undefined on empty input and report it as a [`SeqError`] instead of
//! dividing by zero.

use super::SeqError;

/// Phred+33 encoding offset for FASTQ quality characters.
pub const PHRED_OFFSET: i64 = 33;

/// Calculates the GC content of a read as a percentage.
///
/// Bases are case-folded before counting, so `g` and `c` count the same as
/// `G` and `C`. The result is rounded to two decimal places, with exact
/// ties going to the even digit (`3.125` -> `3.12`).
///
/// # Arguments
///
/// * `sequence` - The nucleotide sequence.
///
/// # Returns
///
/// * `Result<f64, SeqError>` - GC percentage in `[0, 100]`, or
///   `SeqError::EmptySequence` when the sequence has no bases.
pub fn gc_content(sequence: &[u8]) -> Result<f64, SeqError> {
    if sequence.is_empty() {
        return Err(SeqError::EmptySequence);
    }

    let gc_count = sequence
        .iter()
        .filter(|&&base| matches!(base.to_ascii_uppercase(), b'G' | b'C'))
        .count();

    let percent = gc_count as f64 / sequence.len() as f64 * 100.0;
    Ok(round2(percent))
}

/// Number of bases in the read. No validation is performed.
pub fn seq_length(sequence: &[u8]) -> usize {
    sequence.len()
}

/// Mean Phred+33 offset over a quality string.
///
/// Each character contributes `code - 33`; characters below `!` contribute
/// a negative value rather than being clamped.
///
/// # Returns
///
/// * `Result<f64, SeqError>` - The mean offset, or `SeqError::EmptyQuality`.
pub fn mean_quality_offset(quality: &[u8]) -> Result<f64, SeqError> {
    if quality.is_empty() {
        return Err(SeqError::EmptyQuality);
    }

    let total: i64 = quality.iter().map(|&q| q as i64 - PHRED_OFFSET).sum();
    Ok(total as f64 / quality.len() as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
