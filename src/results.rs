use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ReportError;

/// One benchmark trial as recorded in a results CSV.
///
/// The `Size` column is the array size in bytes and is informational;
/// the grouping key for all downstream aggregation is `Multiplier`.
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkRecord {
    #[serde(rename = "Multiplier")]
    pub multiplier: u32,
    #[serde(rename = "Size")]
    pub size: u64,
    #[serde(rename = "Time")]
    pub time: f64,
    #[serde(rename = "DiskReads")]
    pub disk_reads: u64,
    #[serde(rename = "DiskWrites")]
    pub disk_writes: u64,
}

/// Per-multiplier averages across repeated trials.
#[derive(Debug, Clone, PartialEq)]
pub struct AveragedRecord {
    pub multiplier: u32,
    /// First-seen size for this multiplier.
    pub size: u64,
    pub time: f64,
    pub disk_reads: f64,
    pub disk_writes: f64,
}

impl AveragedRecord {
    /// Total disk operations (reads + writes).
    pub fn disk_ops(&self) -> f64 {
        self.disk_reads + self.disk_writes
    }
}

struct Accumulator {
    size: u64,
    time_sum: f64,
    reads_sum: f64,
    writes_sum: f64,
    trials: u32,
}

/// Load a results table and average it per multiplier.
///
/// Ordering of the returned records is unspecified; callers sort by
/// multiplier before plotting. Any unparsable row fails the whole load,
/// there is no partial recovery.
pub fn load_and_average(path: impl AsRef<Path>) -> Result<Vec<AveragedRecord>, ReportError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ReportError::MissingInput(path.to_path_buf()));
    }

    let malformed = |source| ReportError::MalformedInput {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(malformed)?;

    let mut records = Vec::new();
    for row in reader.deserialize::<BenchmarkRecord>() {
        records.push(row.map_err(malformed)?);
    }

    Ok(average_records(records))
}

/// Group trials by multiplier and compute the arithmetic means.
pub fn average_records(records: impl IntoIterator<Item = BenchmarkRecord>) -> Vec<AveragedRecord> {
    let mut groups: HashMap<u32, Accumulator> = HashMap::new();

    for record in records {
        let acc = groups.entry(record.multiplier).or_insert(Accumulator {
            size: record.size,
            time_sum: 0.0,
            reads_sum: 0.0,
            writes_sum: 0.0,
            trials: 0,
        });
        acc.time_sum += record.time;
        acc.reads_sum += record.disk_reads as f64;
        acc.writes_sum += record.disk_writes as f64;
        acc.trials += 1;
    }

    groups
        .into_iter()
        .map(|(multiplier, acc)| {
            let n = acc.trials as f64;
            AveragedRecord {
                multiplier,
                size: acc.size,
                time: acc.time_sum / n,
                disk_reads: acc.reads_sum / n,
                disk_writes: acc.writes_sum / n,
            }
        })
        .collect()
}

/// Ratio of mergesort mean time to quicksort mean time at each multiplier
/// both datasets share, sorted ascending by multiplier.
///
/// Filtering both sides to the common multiplier set before sorting is what
/// makes the positional division exact.
pub fn speedup_series(
    mergesort: &[AveragedRecord],
    quicksort: &[AveragedRecord],
) -> Result<Vec<(u32, f64)>, ReportError> {
    let quick_times: HashMap<u32, f64> = quicksort.iter().map(|r| (r.multiplier, r.time)).collect();

    let mut series: Vec<(u32, f64)> = mergesort
        .iter()
        .filter_map(|r| {
            quick_times
                .get(&r.multiplier)
                .map(|&quick_time| (r.multiplier, r.time / quick_time))
        })
        .collect();

    if series.is_empty() {
        return Err(ReportError::NoCommonData);
    }

    series.sort_unstable_by_key(|&(multiplier, _)| multiplier);
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trial(multiplier: u32, size: u64, time: f64, reads: u64, writes: u64) -> BenchmarkRecord {
        BenchmarkRecord {
            multiplier,
            size,
            time,
            disk_reads: reads,
            disk_writes: writes,
        }
    }

    fn averaged(multiplier: u32, time: f64) -> AveragedRecord {
        AveragedRecord {
            multiplier,
            size: multiplier as u64 * 50,
            time,
            disk_reads: 0.0,
            disk_writes: 0.0,
        }
    }

    #[test]
    fn test_one_record_per_distinct_multiplier() {
        let trials = vec![
            trial(1, 50, 2.0, 10, 20),
            trial(1, 50, 4.0, 30, 40),
            trial(2, 100, 8.0, 50, 60),
            trial(4, 200, 16.0, 70, 80),
        ];

        let mut averages = average_records(trials);
        averages.sort_unstable_by_key(|r| r.multiplier);

        assert_eq!(averages.len(), 3);
        assert_eq!(averages[0].multiplier, 1);
        assert_eq!(averages[0].time, 3.0);
        assert_eq!(averages[0].disk_reads, 20.0);
        assert_eq!(averages[0].disk_writes, 30.0);
        assert_eq!(averages[1].time, 8.0);
        assert_eq!(averages[2].time, 16.0);
    }

    #[test]
    fn test_first_seen_size_is_kept() {
        let trials = vec![trial(3, 150, 1.0, 0, 0), trial(3, 999, 2.0, 0, 0)];

        let averages = average_records(trials);

        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].size, 150);
    }

    #[test]
    fn test_disk_ops_sums_reads_and_writes() {
        let averages = average_records(vec![trial(1, 50, 1.0, 12, 8)]);
        assert_eq!(averages[0].disk_ops(), 20.0);
    }

    #[test]
    fn test_empty_input_averages_to_nothing() {
        assert!(average_records(vec![]).is_empty());
    }

    #[test]
    fn test_speedup_at_matching_multiplier() {
        let merge = vec![averaged(4, 10.0)];
        let quick = vec![averaged(4, 5.0)];

        let series = speedup_series(&merge, &quick).unwrap();
        assert_eq!(series, vec![(4, 2.0)]);
    }

    #[test]
    fn test_speedup_sorted_and_filtered_to_intersection() {
        let merge = vec![averaged(8, 4.0), averaged(1, 1.0), averaged(2, 6.0)];
        let quick = vec![averaged(2, 3.0), averaged(8, 8.0), averaged(16, 1.0)];

        let series = speedup_series(&merge, &quick).unwrap();
        assert_eq!(series, vec![(2, 2.0), (8, 0.5)]);
    }

    #[test]
    fn test_speedup_with_no_common_multipliers() {
        let merge = vec![averaged(1, 1.0)];
        let quick = vec![averaged(2, 1.0)];

        let result = speedup_series(&merge, &quick);
        assert!(matches!(result, Err(ReportError::NoCommonData)));
    }
}
