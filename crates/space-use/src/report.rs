//! The wire-format space-use report and its reader.

use quick_protobuf::MessageWrite;
use quota_net_codec::{decode_message, encode_message};

use crate::{CodecError, RegionInfo};

/// Measured on-disk size of one region.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionSizeSample {
    pub region: RegionInfo,
    pub size: u64,
}

impl RegionSizeSample {
    pub fn new(region: RegionInfo, size: u64) -> Self {
        Self { region, size }
    }
}

impl TryFrom<crate::proto::space_quota::RegionSpaceUse> for RegionSizeSample {
    type Error = CodecError;

    fn try_from(value: crate::proto::space_quota::RegionSpaceUse) -> Result<Self, Self::Error> {
        let region = value
            .region_info
            .ok_or(CodecError::MissingField("region_info"))?
            .try_into()?;
        let size = u64::try_from(value.region_size)
            .map_err(|_| CodecError::NegativeSize(value.region_size))?;
        Ok(Self { region, size })
    }
}

/// An immutable report of region sizes, held in its wire representation.
///
/// Reports are produced by [`crate::ReportBuilder`] or received from a peer
/// through [`SpaceUseReport::from_bytes`] or [`crate::SpaceUseReportCodec`].
/// Two reports carrying the same samples are equivalent to consumers
/// regardless of entry order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpaceUseReport {
    inner: crate::proto::space_quota::RegionSpaceUseReportRequest,
}

impl SpaceUseReport {
    pub(crate) fn from_entries(entries: Vec<crate::proto::space_quota::RegionSpaceUse>) -> Self {
        Self {
            inner: crate::proto::space_quota::RegionSpaceUseReportRequest { space_use: entries },
        }
    }

    /// Number of region entries in the report.
    pub fn len(&self) -> usize {
        self.inner.space_use.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.space_use.is_empty()
    }

    /// Size of the report in bytes once serialized, without framing.
    pub fn encoded_len(&self) -> usize {
        self.inner.get_size()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        Ok(encode_message(&self.inner)?)
    }

    /// Parse a report from its unframed wire bytes.
    ///
    /// Only the protobuf structure is checked here; identifiers are
    /// validated when the report is decoded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            inner: decode_message(bytes)?,
        })
    }

    /// Decode every entry, in report order.
    ///
    /// Fails on the first entry that does not decode; no partial result is
    /// returned.
    pub fn decode(&self) -> Result<Vec<RegionSizeSample>, CodecError> {
        self.samples().collect()
    }

    /// Lazily decode the entries, in report order.
    pub fn samples(&self) -> impl Iterator<Item = Result<RegionSizeSample, CodecError>> + '_ {
        self.inner
            .space_use
            .iter()
            .map(|entry| RegionSizeSample::try_from(entry.clone()))
    }
}

impl TryFrom<crate::proto::space_quota::RegionSpaceUseReportRequest> for SpaceUseReport {
    type Error = CodecError;

    fn try_from(
        value: crate::proto::space_quota::RegionSpaceUseReportRequest,
    ) -> Result<Self, Self::Error> {
        Ok(Self { inner: value })
    }
}

impl From<SpaceUseReport> for crate::proto::space_quota::RegionSpaceUseReportRequest {
    fn from(value: SpaceUseReport) -> Self {
        value.inner
    }
}
