pub mod criteria;
pub mod qc;
pub mod report;

pub use criteria::{Bounds, BoundsSpec, FilterCriteria, FilterError};
pub use qc::{
    Criterion, FastqFilter, FastqRecords, FilterMetrics, FilterOutcome, SequenceRecord, SkipReason,
    Verdict,
};
pub use report::generate_report;
