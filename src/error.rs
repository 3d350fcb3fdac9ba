use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading benchmark result tables.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("malformed input in {}: {source}", path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("no common multipliers between the two datasets")]
    NoCommonData,
}
