//! Stream framing for space-use reports.

use quota_net_codec::ProtocolCodec;

use crate::{CodecError, SpaceUseArgs, SpaceUseReport};

/// Length-delimited codec carrying [`SpaceUseReport`]s over a byte stream.
pub type SpaceUseReportCodec = ProtocolCodec<
    crate::proto::space_quota::RegionSpaceUseReportRequest,
    SpaceUseReport,
    CodecError,
>;

/// Codec honouring the configured maximum report size.
pub fn report_codec(args: &SpaceUseArgs) -> SpaceUseReportCodec {
    SpaceUseReportCodec::new(args.max_report_size)
}
