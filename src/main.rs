use std::path::Path;

use anyhow::{Context, Result};
use es_report::charts;

const MERGESORT_RESULTS: &str = "data/results/mergesort_results.csv";
const QUICKSORT_RESULTS: &str = "data/results/quicksort_results.csv";
const OUTPUT_DIR: &str = "results";

fn main() {
    // Failures are logged, never turned into a non-zero exit: downstream
    // tooling treats a partial report the same as a full one.
    if let Err(err) = run() {
        eprintln!("Error in report generation: {err:?}");
    }
}

fn run() -> Result<()> {
    println!("=== External Sort Benchmark Report ===\n");

    for input in [MERGESORT_RESULTS, QUICKSORT_RESULTS] {
        if !Path::new(input).exists() {
            println!("Warning: {input} not found. Some charts may be skipped.");
        }
    }

    std::fs::create_dir_all(OUTPUT_DIR)
        .with_context(|| format!("failed to create output directory '{OUTPUT_DIR}'"))?;

    let mergesort = Path::new(MERGESORT_RESULTS);
    let quicksort = Path::new(QUICKSORT_RESULTS);
    let output = Path::new(OUTPUT_DIR);

    let renders: [(&str, fn(&Path, &Path, &Path) -> Result<()>); 4] = [
        ("time comparison", charts::time_comparison),
        ("disk operations comparison", charts::disk_operations),
        ("detailed disk operations", charts::detailed_disk_operations),
        ("speedup ratio", charts::speedup_ratio),
    ];

    for (name, render) in renders {
        if let Err(err) = render(mergesort, quicksort, output) {
            eprintln!("Cannot create {name} chart: {err:#}");
        }
    }

    println!("\nReport complete. Charts saved in '{OUTPUT_DIR}'.");
    Ok(())
}
