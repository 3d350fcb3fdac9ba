#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const HEADER: &str = "Multiplier,Size,Time,DiskReads,DiskWrites";

/// Write a results CSV fixture. Rows are (multiplier, size, time, reads, writes).
pub fn write_results(dir: &Path, name: &str, rows: &[(u32, u64, f64, u64, u64)]) -> PathBuf {
    let path = dir.join(name);
    let mut contents = String::from(HEADER);
    for (multiplier, size, time, reads, writes) in rows {
        contents.push_str(&format!("\n{multiplier},{size},{time},{reads},{writes}"));
    }
    contents.push('\n');
    fs::write(&path, contents).expect("Failed to write fixture csv");
    path
}

/// Two trials per multiplier at 1, 2 and 4, shaped like a real benchmark run.
pub fn standard_rows(base_time: f64) -> Vec<(u32, u64, f64, u64, u64)> {
    let mut rows = Vec::new();
    for multiplier in [1u32, 2, 4] {
        let size = multiplier as u64 * 50 * 1024 * 1024;
        for trial in 0..2u64 {
            rows.push((
                multiplier,
                size,
                base_time * multiplier as f64 + trial as f64,
                100 * multiplier as u64 + trial,
                80 * multiplier as u64 + trial,
            ));
        }
    }
    rows
}
