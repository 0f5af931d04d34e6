pub mod parallel;

pub use parallel::{parallel_map, ParallelConfig, ParallelError};
