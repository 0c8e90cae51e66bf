//! Space-use reporting CLI arguments.

use clap::Args;
use serde::{Deserialize, Serialize};

/// Snapshots with at least this many regions are encoded on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Largest framed report accepted by [`crate::SpaceUseReportCodec`].
pub const DEFAULT_MAX_REPORT_SIZE: usize = 16 * 1024 * 1024;

/// Space-use report configuration.
#[derive(Debug, Args, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[command(next_help_heading = "Space Use Reports")]
#[serde(default)]
pub struct SpaceUseArgs {
    /// Region count at which report entries are encoded in parallel.
    #[arg(
        long = "space-use.parallel-threshold",
        default_value_t = DEFAULT_PARALLEL_THRESHOLD,
        value_name = "REGIONS"
    )]
    pub parallel_threshold: usize,

    /// Maximum size of a framed report in bytes.
    #[arg(
        long = "space-use.max-report-size",
        default_value_t = DEFAULT_MAX_REPORT_SIZE,
        value_name = "BYTES"
    )]
    pub max_report_size: usize,
}

impl Default for SpaceUseArgs {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            max_report_size: DEFAULT_MAX_REPORT_SIZE,
        }
    }
}
