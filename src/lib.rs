// External Sort Benchmark Report Generator
//
// Reads the mergesort/quicksort benchmark result tables, averages the
// repeated trials per size multiplier, and renders comparison charts
// as PNG files.

pub mod charts;
pub mod error;
pub mod results;

// Export the main types
pub use error::ReportError;
pub use results::{AveragedRecord, BenchmarkRecord, load_and_average, speedup_series};
