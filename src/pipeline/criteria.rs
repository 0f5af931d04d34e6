//! Selection criteria for the FASTQ filter.
//!
//! Bounds are closed intervals. A bound may be given as a single upper
//! value, in which case the lower end is zero: `80.0` and `(0.0, 80.0)`
//! build the same [`Bounds`]. Malformed bounds are rejected when the
//! criteria are built, never at filtering time.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

use crate::utils::parallel::ParallelError;

/// Default GC bounds, in percent.
pub const DEFAULT_GC_BOUNDS: (f64, f64) = (0.0, 100.0);

/// Default upper length bound.
pub const DEFAULT_MAX_LENGTH: usize = u32::MAX as usize;

// --- Error Type ---
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parallel processing error: {0}")]
    Parallel(#[from] ParallelError),
}

/// A closed interval `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    low: T,
    high: T,
}

impl<T: PartialOrd + Copy + Debug> Bounds<T> {
    /// Builds `[low, high]`. Fails if `low > high` or the endpoints are not
    /// comparable (NaN).
    pub fn new(low: T, high: T) -> Result<Self, FilterError> {
        // Written as a negation so NaN endpoints are rejected too.
        if !(low <= high) {
            return Err(FilterError::InvalidBounds(format!(
                "lower bound {:?} is not <= upper bound {:?}",
                low, high
            )));
        }
        Ok(Bounds { low, high })
    }

    pub fn low(&self) -> T {
        self.low
    }

    pub fn high(&self) -> T {
        self.high
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: T) -> bool {
        self.low <= value && value <= self.high
    }
}

impl<T: PartialOrd + Copy + Debug + Default> Bounds<T> {
    /// `[0, high]`.
    pub fn upto(high: T) -> Result<Self, FilterError> {
        Self::new(T::default(), high)
    }
}

/// Bounds as supplied by a caller or a config file: either a bare upper
/// bound or a `(low, high)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundsSpec<T> {
    Upper(T),
    Range(T, T),
}

impl<T: PartialOrd + Copy + Debug + Default> BoundsSpec<T> {
    pub fn normalize(self) -> Result<Bounds<T>, FilterError> {
        match self {
            BoundsSpec::Upper(high) => Bounds::upto(high),
            BoundsSpec::Range(low, high) => Bounds::new(low, high),
        }
    }
}

impl<T> From<T> for BoundsSpec<T> {
    fn from(high: T) -> Self {
        BoundsSpec::Upper(high)
    }
}

impl<T> From<(T, T)> for BoundsSpec<T> {
    fn from((low, high): (T, T)) -> Self {
        BoundsSpec::Range(low, high)
    }
}

impl<T> From<Bounds<T>> for BoundsSpec<T> {
    fn from(bounds: Bounds<T>) -> Self {
        BoundsSpec::Range(bounds.low, bounds.high)
    }
}

/// Validated filter criteria.
///
/// Fields are only reachable through [`FilterCriteria::new`] and
/// deserialization, both of which validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCriteria", into = "RawCriteria")]
pub struct FilterCriteria {
    gc_bounds: Bounds<f64>,
    length_bounds: Bounds<usize>,
    quality_threshold: f64,
}

impl FilterCriteria {
    /// Builds criteria from scalar-or-pair bounds.
    ///
    /// # Arguments
    ///
    /// * `gc_bounds` - GC percentage bounds, e.g. `80.0` or `(20.0, 80.0)`.
    /// * `length_bounds` - Read length bounds, e.g. `150` or `(50, 150)`.
    /// * `quality_threshold` - Minimum mean Phred+33 offset.
    ///
    /// # Returns
    ///
    /// * `Result<Self, FilterError>` - `InvalidBounds` for inverted or NaN
    ///   bounds, `InvalidConfig` for a NaN threshold.
    pub fn new(
        gc_bounds: impl Into<BoundsSpec<f64>>,
        length_bounds: impl Into<BoundsSpec<usize>>,
        quality_threshold: f64,
    ) -> Result<Self, FilterError> {
        if quality_threshold.is_nan() {
            return Err(FilterError::InvalidConfig(
                "quality threshold is NaN".to_string(),
            ));
        }

        Ok(FilterCriteria {
            gc_bounds: gc_bounds.into().normalize()?,
            length_bounds: length_bounds.into().normalize()?,
            quality_threshold,
        })
    }

    pub fn gc_bounds(&self) -> Bounds<f64> {
        self.gc_bounds
    }

    pub fn length_bounds(&self) -> Bounds<usize> {
        self.length_bounds
    }

    /// Minimum acceptable mean quality offset, inclusive.
    pub fn quality_threshold(&self) -> f64 {
        self.quality_threshold
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            gc_bounds: Bounds {
                low: DEFAULT_GC_BOUNDS.0,
                high: DEFAULT_GC_BOUNDS.1,
            },
            length_bounds: Bounds {
                low: 0,
                high: DEFAULT_MAX_LENGTH,
            },
            quality_threshold: 0.0,
        }
    }
}

/// Unvalidated on-disk form of [`FilterCriteria`]. Missing fields take the
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCriteria {
    gc_bounds: BoundsSpec<f64>,
    length_bounds: BoundsSpec<usize>,
    quality_threshold: f64,
}

impl Default for RawCriteria {
    fn default() -> Self {
        FilterCriteria::default().into()
    }
}

impl TryFrom<RawCriteria> for FilterCriteria {
    type Error = FilterError;

    fn try_from(raw: RawCriteria) -> Result<Self, Self::Error> {
        FilterCriteria::new(raw.gc_bounds, raw.length_bounds, raw.quality_threshold)
    }
}

impl From<FilterCriteria> for RawCriteria {
    fn from(criteria: FilterCriteria) -> Self {
        RawCriteria {
            gc_bounds: criteria.gc_bounds.into(),
            length_bounds: criteria.length_bounds.into(),
            quality_threshold: criteria.quality_threshold,
        }
    }
}
