//! Configuration loading and logging setup.
//!
//! Filter criteria can be kept in a JSON file. Each bound may be written
//! either as a bare upper bound or as a `[low, high]` pair, and any field
//! may be left out to take its default:
//!
//! ```json
//! { "gc_bounds": [20, 80], "length_bounds": 150, "quality_threshold": 20 }
//! ```

use crate::pipeline::criteria::{FilterCriteria, FilterError};
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

/// Initializes `env_logger`, defaulting to `info` unless `RUST_LOG` is set.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Parses and validates filter criteria from a JSON string.
pub fn criteria_from_json(json: &str) -> Result<FilterCriteria, FilterError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads filter criteria from a JSON file.
///
/// # Arguments
///
/// * `path` - Path to the JSON config file.
///
/// # Returns
///
/// * `Result<FilterCriteria>` - Validated criteria, or an error naming the
///   file that could not be read or parsed.
pub fn load_criteria(path: impl AsRef<Path>) -> Result<FilterCriteria> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read filter config: {}", path.display()))?;

    let criteria = criteria_from_json(&contents)
        .with_context(|| format!("Invalid filter config: {}", path.display()))?;

    info!("Loaded filter criteria from {}: {:?}", path.display(), criteria);
    Ok(criteria)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::criteria::Bounds;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_criteria_from_json() {
        let criteria =
            criteria_from_json(r#"{"gc_bounds": [20, 80], "length_bounds": 150}"#).unwrap();
        assert_eq!(criteria.gc_bounds(), Bounds::new(20.0, 80.0).unwrap());
        assert_eq!(criteria.length_bounds(), Bounds::new(0, 150).unwrap());
        assert_eq!(criteria.quality_threshold(), 0.0);
    }

    #[test]
    fn test_criteria_from_json_invalid() {
        assert!(criteria_from_json(r#"{"length_bounds": [100, 10]}"#).is_err());
        assert!(criteria_from_json("not json").is_err());
    }

    #[test]
    fn test_load_criteria_from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("filter.json");
        let mut file = fs::File::create(&file_path).unwrap();
        file.write_all(br#"{"gc_bounds": 60, "quality_threshold": 30}"#)
            .unwrap();

        let criteria = load_criteria(&file_path).unwrap();
        assert_eq!(criteria, FilterCriteria::new(60.0, (0, u32::MAX as usize), 30.0).unwrap());

        dir.close().unwrap();
    }

    #[test]
    fn test_load_criteria_missing_file() {
        let err = load_criteria("does_not_exist.json").unwrap_err();
        assert!(err.to_string().contains("does_not_exist.json"));
    }
}
