//! Turns a usage snapshot into a space-use report.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    BuildError, RegionInfo, SpaceUseArgs, SpaceUseReport, UsageSnapshot, metrics::ReportMetrics,
};

/// Validating converter from [`UsageSnapshot`] to [`SpaceUseReport`].
///
/// The builder holds no per-report state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    parallel_threshold: usize,
    metrics: ReportMetrics,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new(&SpaceUseArgs::default())
    }
}

impl ReportBuilder {
    pub fn new(args: &SpaceUseArgs) -> Self {
        Self {
            parallel_threshold: args.parallel_threshold,
            metrics: ReportMetrics::default(),
        }
    }

    /// Build a report holding one entry per region of `snapshot`.
    ///
    /// Entries are ordered by region so equal snapshots always produce
    /// identical reports. A missing snapshot, a region without a measurement
    /// or a negative measurement aborts the build; regions are checked in
    /// order and the first offender is reported.
    pub fn build(&self, snapshot: Option<&UsageSnapshot>) -> Result<SpaceUseReport, BuildError> {
        let result = self.try_build(snapshot);
        match &result {
            Ok(report) => {
                debug!(
                    regions = report.len(),
                    bytes = report.encoded_len(),
                    "Built region space use report"
                );
                self.metrics.record_report(report.len(), report.encoded_len());
            }
            Err(error) => {
                warn!(%error, "Failed to build region space use report");
                self.metrics.record_failure(error.reason());
            }
        }
        result
    }

    fn try_build(&self, snapshot: Option<&UsageSnapshot>) -> Result<SpaceUseReport, BuildError> {
        let snapshot = snapshot.ok_or(BuildError::NullSnapshot)?;

        let mut measured: Vec<(&RegionInfo, Option<i64>)> = snapshot
            .iter()
            .map(|(region, size)| (region, *size))
            .collect();
        measured.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let validated = measured
            .into_iter()
            .map(|(region, size)| match size {
                None => Err(BuildError::NullMeasurement {
                    region: region.clone(),
                }),
                Some(size) if size < 0 => Err(BuildError::NegativeSize {
                    region: region.clone(),
                    size,
                }),
                Some(size) => Ok((region, size)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let entries: Vec<_> = if validated.len() >= self.parallel_threshold {
            validated
                .into_par_iter()
                .map(|(region, size)| space_use_entry(region, size))
                .collect()
        } else {
            validated
                .into_iter()
                .map(|(region, size)| space_use_entry(region, size))
                .collect()
        };

        Ok(SpaceUseReport::from_entries(entries))
    }
}

fn space_use_entry(region: &RegionInfo, size: i64) -> crate::proto::space_quota::RegionSpaceUse {
    crate::proto::space_quota::RegionSpaceUse {
        region_info: Some(region.into()),
        region_size: size,
    }
}

/// Build a report with the default builder settings.
pub fn build_report(snapshot: Option<&UsageSnapshot>) -> Result<SpaceUseReport, BuildError> {
    ReportBuilder::default().build(snapshot)
}
