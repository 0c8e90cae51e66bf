//! Region space-use reports.
//!
//! A region server periodically tells the master how much disk each of its
//! regions occupies so the master can enforce space quotas. This crate turns
//! a sampled [`UsageSnapshot`] into the wire-format [`SpaceUseReport`] and
//! decodes reports back into [`RegionSizeSample`]s.
//!
//! # Wire format
//!
//! - Schema: `proto/space_quota.proto`
//! - Report: `RegionSpaceUseReportRequest { repeated RegionSpaceUse space_use }`
//! - Entry: `RegionSpaceUse { RegionInfo region_info, int64 region_size }`
//!
//! # Flow
//!
//! 1. The sampler measures region sizes into a [`UsageSnapshot`]
//! 2. [`ReportBuilder::build`] validates every measurement and encodes the report
//! 3. The transport ships [`SpaceUseReport::to_bytes`] or frames it with
//!    [`SpaceUseReportCodec`]
//! 4. The master parses the report and calls [`SpaceUseReport::decode`]

mod args;
mod builder;
mod codec;
mod error;
mod metrics;
mod region;
mod report;
mod snapshot;
mod summary;
mod table;

// Generated from proto/space_quota.proto by build.rs
#[allow(unreachable_pub)]
mod proto {
    include!(concat!(env!("OUT_DIR"), "/proto/mod.rs"));
}

pub use args::{DEFAULT_MAX_REPORT_SIZE, DEFAULT_PARALLEL_THRESHOLD, SpaceUseArgs};
pub use builder::{ReportBuilder, build_report};
pub use codec::{SpaceUseReportCodec, report_codec};
pub use error::{BuildError, CodecError, IdentifierError};
pub use region::{RegionInfo, RegionInfoBuilder};
pub use report::{RegionSizeSample, SpaceUseReport};
pub use snapshot::UsageSnapshot;
pub use summary::{SpaceUseSummary, TableUsage};
pub use table::{DEFAULT_NAMESPACE, TableName};
