use log::debug;
use rayon::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParallelError {
    #[error("Thread error: {0}")]
    ThreadError(String),

    #[error("Invalid chunk size: {0}")]
    InvalidChunkSize(usize),
}

/// Configuration for parallel processing
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of threads to use
    pub threads: usize,

    /// Size of chunks for processing
    pub chunk_size: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        ParallelConfig {
            threads: rayon::current_num_threads(),
            chunk_size: 1000,
        }
    }
}

/// Maps `processor` over `items` on a dedicated rayon pool.
///
/// Items are split into chunks of `config.chunk_size`; the output keeps the
/// input order regardless of which thread handled each chunk.
pub fn parallel_map<T, U, F>(
    items: &[T],
    processor: F,
    config: Option<ParallelConfig>,
) -> Result<Vec<U>, ParallelError>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Send + Sync,
{
    let config = config.unwrap_or_default();

    // Validate configuration
    if config.chunk_size == 0 {
        return Err(ParallelError::InvalidChunkSize(0));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .map_err(|e| ParallelError::ThreadError(format!("Failed to build thread pool: {}", e)))?;

    debug!(
        "Processing {} items in chunks of {} on {} threads",
        items.len(),
        config.chunk_size,
        config.threads
    );

    Ok(pool.install(|| {
        items
            .par_chunks(config.chunk_size)
            .flat_map_iter(|chunk| chunk.iter().map(&processor))
            .collect()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_map_preserves_order() {
        let items: Vec<usize> = (0..10_000).collect();
        let config = ParallelConfig {
            threads: 4,
            chunk_size: 64,
        };
        let doubled = parallel_map(&items, |x| x * 2, Some(config)).unwrap();
        assert_eq!(doubled.len(), items.len());
        assert!(doubled.iter().enumerate().all(|(i, &v)| v == i * 2));
    }

    #[test]
    fn test_parallel_map_empty() {
        let items: Vec<u8> = Vec::new();
        let out = parallel_map(&items, |b| *b, None).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = ParallelConfig {
            threads: 1,
            chunk_size: 0,
        };
        let result = parallel_map(&[1, 2, 3], |x| x + 1, Some(config));
        assert!(matches!(result, Err(ParallelError::InvalidChunkSize(0))));
    }
}
