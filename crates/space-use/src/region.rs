//! Region identifiers and their wire encoding.

use std::fmt;

use bytes::Bytes;
use quota_net_codec::{decode_message, encode_message};

use crate::{CodecError, IdentifierError, TableName};

/// Identifies one region: a contiguous key range of a table.
///
/// Compared, hashed and ordered by value (table, start key, end key, region
/// id), so two independently decoded identifiers for the same region are
/// interchangeable as map keys. Empty keys mean the range is unbounded on
/// that side; the keys are opaque and their relative order is not checked.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionInfo {
    table: TableName,
    start_key: Bytes,
    end_key: Bytes,
    region_id: u64,
}

impl RegionInfo {
    pub fn builder(table: TableName) -> RegionInfoBuilder {
        RegionInfoBuilder {
            table,
            start_key: Bytes::new(),
            end_key: Bytes::new(),
            region_id: 0,
        }
    }

    pub fn table(&self) -> &TableName {
        &self.table
    }

    pub fn start_key(&self) -> &[u8] {
        &self.start_key
    }

    pub fn end_key(&self) -> &[u8] {
        &self.end_key
    }

    /// Creation timestamp distinguishing regions that reuse a key range.
    pub fn region_id(&self) -> u64 {
        self.region_id
    }

    /// Serialize the identifier as an opaque protobuf blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let proto = crate::proto::space_quota::RegionInfo::from(self);
        Ok(encode_message(&proto)?)
    }

    /// Parse an identifier previously produced by [`RegionInfo::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let proto: crate::proto::space_quota::RegionInfo = decode_message(bytes)
            .map_err(|_| CodecError::MalformedIdentifier(IdentifierError::Unparseable))?;
        Self::try_from(proto)
    }
}

/// Builder for [`RegionInfo`].
#[derive(Debug, Clone)]
pub struct RegionInfoBuilder {
    table: TableName,
    start_key: Bytes,
    end_key: Bytes,
    region_id: u64,
}

impl RegionInfoBuilder {
    pub fn with_start_key(mut self, key: impl Into<Bytes>) -> Self {
        self.start_key = key.into();
        self
    }

    pub fn with_end_key(mut self, key: impl Into<Bytes>) -> Self {
        self.end_key = key.into();
        self
    }

    pub fn with_region_id(mut self, region_id: u64) -> Self {
        self.region_id = region_id;
        self
    }

    pub fn build(self) -> RegionInfo {
        RegionInfo {
            table: self.table,
            start_key: self.start_key,
            end_key: self.end_key,
            region_id: self.region_id,
        }
    }
}

impl fmt::Display for RegionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.table,
            self.start_key.escape_ascii(),
            self.region_id
        )
    }
}

impl TryFrom<crate::proto::space_quota::RegionInfo> for RegionInfo {
    type Error = CodecError;

    fn try_from(value: crate::proto::space_quota::RegionInfo) -> Result<Self, Self::Error> {
        let table = value
            .table_name
            .ok_or(CodecError::MalformedIdentifier(
                IdentifierError::MissingTableName,
            ))?
            .try_into()?;

        Ok(Self {
            table,
            start_key: value.start_key.into(),
            end_key: value.end_key.into(),
            region_id: value.region_id,
        })
    }
}

impl From<&RegionInfo> for crate::proto::space_quota::RegionInfo {
    fn from(value: &RegionInfo) -> Self {
        crate::proto::space_quota::RegionInfo {
            table_name: Some((&value.table).into()),
            start_key: value.start_key.to_vec(),
            end_key: value.end_key.to_vec(),
            region_id: value.region_id,
        }
    }
}

impl From<RegionInfo> for crate::proto::space_quota::RegionInfo {
    fn from(value: RegionInfo) -> Self {
        (&value).into()
    }
}

impl<'a> arbitrary::Arbitrary<'a> for RegionInfo {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let table: TableName = u.arbitrary()?;
        let start_key: Vec<u8> = u.arbitrary()?;
        let end_key: Vec<u8> = u.arbitrary()?;

        Ok(RegionInfo::builder(table)
            .with_start_key(start_key)
            .with_end_key(end_key)
            .with_region_id(u.arbitrary()?)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;
    use proptest_arbitrary_interop::arb;

    fn region(start: &'static [u8], end: &'static [u8]) -> RegionInfo {
        RegionInfo::builder("table1".parse().unwrap())
            .with_start_key(start)
            .with_end_key(end)
            .build()
    }

    #[test]
    fn test_equality_is_structural() {
        assert_eq!(region(b"a", b"b"), region(b"a", b"b"));
        assert_ne!(region(b"a", b"b"), region(b"b", b"c"));
        assert_ne!(
            region(b"a", b"b"),
            RegionInfo::builder("table1".parse().unwrap())
                .with_start_key(&b"a"[..])
                .with_end_key(&b"b"[..])
                .with_region_id(1)
                .build()
        );
    }

    #[test]
    fn test_orders_by_table_then_start_key() {
        let other_table = RegionInfo::builder("table0".parse().unwrap())
            .with_start_key(&b"z"[..])
            .build();
        let mut regions = vec![region(b"c", b"d"), region(b"a", b"b"), other_table.clone()];
        regions.sort();
        assert_eq!(regions, vec![other_table, region(b"a", b"b"), region(b"c", b"d")]);
    }

    #[test]
    fn test_keys_are_not_range_checked() {
        let inverted = region(b"z", b"a");
        let proto = crate::proto::space_quota::RegionInfo::from(&inverted);
        assert_eq!(RegionInfo::try_from(proto).unwrap(), inverted);
    }

    #[test]
    fn test_missing_table_name_is_malformed() {
        let mut proto = crate::proto::space_quota::RegionInfo::from(&region(b"a", b"b"));
        proto.table_name = None;
        assert_matches!(
            RegionInfo::try_from(proto),
            Err(CodecError::MalformedIdentifier(
                IdentifierError::MissingTableName
            ))
        );
    }

    #[test]
    fn test_invalid_qualifier_is_malformed() {
        let mut proto = crate::proto::space_quota::RegionInfo::from(&region(b"a", b"b"));
        if let Some(table) = proto.table_name.as_mut() {
            table.qualifier = b"bad name".to_vec();
        }
        assert_matches!(
            RegionInfo::try_from(proto),
            Err(CodecError::MalformedIdentifier(
                IdentifierError::IllegalCharacter { part: "qualifier", .. }
            ))
        );
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        // Length-delimited tag with no length.
        assert_matches!(
            RegionInfo::from_bytes(&[0x0a]),
            Err(CodecError::MalformedIdentifier(IdentifierError::Unparseable))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(region(b"a", b"b").to_string(), "table1,a,0");
    }

    proptest! {
        #[test]
        fn test_region_proto_roundtrip(region in arb::<RegionInfo>()) {
            let proto = crate::proto::space_quota::RegionInfo::from(&region);
            let decoded = RegionInfo::try_from(proto).unwrap();
            prop_assert_eq!(decoded, region);
        }

        #[test]
        fn test_region_bytes_roundtrip(region in arb::<RegionInfo>()) {
            let decoded = RegionInfo::from_bytes(&region.to_bytes().unwrap()).unwrap();
            prop_assert_eq!(decoded, region);
        }
    }
}
