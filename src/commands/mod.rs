//! Command implementations

pub mod benchmark;
pub mod learn;
pub mod stats;

pub use benchmark::{BenchmarkResult, run_benchmark};
pub use learn::{LearnSummary, run_learn};
pub use stats::{StatsReport, load_stats};
