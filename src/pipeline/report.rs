//! Plain-text summary of a filter run.

use crate::pipeline::criteria::FilterCriteria;
use crate::pipeline::qc::FilterMetrics;

/// Generate a formatted text report from the metrics of one filter run.
pub fn generate_report(metrics: &FilterMetrics, criteria: &FilterCriteria) -> String {
    let mut report = String::new();

    // Header
    report.push_str("FASTQ Filter Report\n");
    report.push_str("===================\n\n");

    // Criteria Section
    report.push_str("Criteria:\n");
    report.push_str(&format!(
        "  GC content: {:.2}% - {:.2}%\n",
        criteria.gc_bounds().low(),
        criteria.gc_bounds().high()
    ));
    report.push_str(&format!(
        "  Length: {} - {} bp\n",
        criteria.length_bounds().low(),
        criteria.length_bounds().high()
    ));
    report.push_str(&format!(
        "  Minimum mean quality: {:.2}\n\n",
        criteria.quality_threshold()
    ));

    // Metrics Section
    report.push_str("Records:\n");
    report.push_str(&format!("  Total: {}\n", metrics.total_records));
    report.push_str(&format!(
        "  Passed: {} ({:.1}%)\n",
        metrics.passed_records,
        metrics.pass_rate()
    ));

    report.push_str(&format!("  Rejected: {}\n", metrics.rejected()));
    if metrics.rejected() > 0 {
        report.push_str(&format!("    GC content: {}\n", metrics.rejected_gc));
        report.push_str(&format!("    Length: {}\n", metrics.rejected_length));
        report.push_str(&format!("    Quality: {}\n", metrics.rejected_quality));
    }

    report.push_str(&format!("  Skipped: {}\n", metrics.skipped()));
    if metrics.skipped() > 0 {
        report.push_str(&format!("    Invalid bases: {}\n", metrics.skipped_invalid));
        report.push_str(&format!(
            "    Sequence/quality length mismatch: {}\n",
            metrics.skipped_mismatch
        ));
        report.push_str(&format!("    Empty: {}\n", metrics.skipped_empty));
    }
    report.push('\n');

    // Footer
    report.push_str("----\n");
    report.push_str(&format!(
        "Bases passed: {}/{}\n",
        metrics.passed_bases, metrics.total_bases
    ));

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::qc::{FastqFilter, FastqRecords};

    #[test]
    fn test_report_contains_counts() {
        let criteria = FilterCriteria::new((0.0, 80.0), (10, 100), 0.0).unwrap();
        let mut input = FastqRecords::new();
        input.insert(
            "r1".to_string(),
            ("ATGCATGCATGC".to_string(), "IIIIIIIIIIII".to_string()),
        );
        input.insert("r2".to_string(), ("ATGX".to_string(), "IIII".to_string()));

        let outcome = FastqFilter::new(criteria.clone()).filter_with_metrics(&input);
        let report = generate_report(&outcome.metrics, &criteria);

        assert!(report.contains("GC content: 0.00% - 80.00%"));
        assert!(report.contains("Length: 10 - 100 bp"));
        assert!(report.contains("Total: 2"));
        assert!(report.contains("Passed: 1 (50.0%)"));
        assert!(report.contains("Invalid bases: 1"));
        assert!(report.contains("Bases passed: 12/16"));
    }

    #[test]
    fn test_report_empty_run() {
        let report = generate_report(&FilterMetrics::default(), &FilterCriteria::default());
        assert!(report.contains("Total: 0"));
        assert!(report.contains("Passed: 0 (0.0%)"));
        assert!(!report.contains("Invalid bases"));
    }
}
