//! TOML description of a usage snapshot.
//!
//! ```toml
//! [[region]]
//! table = "table1"
//! start_key = "a"
//! end_key = "b"
//! size = 1048576
//!
//! [[region]]
//! table = "ns:table2"
//! start_key = "0x00ff"   # hex when prefixed with 0x
//! region_id = 1700000000000
//! # no size: the measurement is missing
//! ```

use eyre::{Result, WrapErr};
use quota_space_use::{RegionInfo, TableName, UsageSnapshot};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotFile {
    #[serde(default)]
    region: Vec<RegionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegionEntry {
    table: String,
    #[serde(default)]
    start_key: String,
    #[serde(default)]
    end_key: String,
    #[serde(default)]
    region_id: u64,
    size: Option<i64>,
}

fn parse_key(key: &str) -> Result<Vec<u8>> {
    match key.strip_prefix("0x") {
        Some(hex_key) => hex::decode(hex_key).wrap_err_with(|| format!("invalid hex key {key:?}")),
        None => Ok(key.as_bytes().to_vec()),
    }
}

impl RegionEntry {
    fn region(&self) -> Result<RegionInfo> {
        let table: TableName = self
            .table
            .parse()
            .wrap_err_with(|| format!("invalid table name {:?}", self.table))?;
        Ok(RegionInfo::builder(table)
            .with_start_key(parse_key(&self.start_key)?)
            .with_end_key(parse_key(&self.end_key)?)
            .with_region_id(self.region_id)
            .build())
    }
}

/// Parse a snapshot, keeping regions without a size as missing measurements.
pub(crate) fn parse_snapshot(contents: &str) -> Result<UsageSnapshot> {
    let file: SnapshotFile = toml::from_str(contents).wrap_err("invalid snapshot file")?;

    let mut snapshot = UsageSnapshot::with_capacity(file.region.len());
    for (index, entry) in file.region.iter().enumerate() {
        let region = entry
            .region()
            .wrap_err_with(|| format!("region entry {index}"))?;
        if snapshot.record(region, entry.size).is_some() {
            eyre::bail!("region entry {index} duplicates an earlier region");
        }
    }
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = parse_snapshot(
            r#"
            [[region]]
            table = "table1"
            start_key = "a"
            end_key = "b"
            size = 1048576

            [[region]]
            table = "ns:table2"
            start_key = "0x00ff"
            region_id = 42
            "#,
        )
        .unwrap();

        let first = RegionInfo::builder("table1".parse().unwrap())
            .with_start_key(&b"a"[..])
            .with_end_key(&b"b"[..])
            .build();
        let second = RegionInfo::builder("ns:table2".parse().unwrap())
            .with_start_key(vec![0x00, 0xff])
            .with_region_id(42)
            .build();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(&first), Some(Some(1_048_576)));
        assert_eq!(snapshot.get(&second), Some(None));
    }

    #[test]
    fn test_empty_file_is_empty_snapshot() {
        assert!(parse_snapshot("").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_duplicate_region() {
        let result = parse_snapshot(
            r#"
            [[region]]
            table = "t"
            size = 1

            [[region]]
            table = "default:t"
            size = 2
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_invalid_table() {
        assert!(parse_snapshot("[[region]]\ntable = \"bad name\"\n").is_err());
    }

    #[test]
    fn test_rejects_invalid_hex_key() {
        assert!(parse_snapshot("[[region]]\ntable = \"t\"\nstart_key = \"0xzz\"\n").is_err());
    }
}
