//! Per-table aggregation of decoded region sizes.

use std::collections::BTreeMap;

use crate::{RegionSizeSample, TableName};

/// Space used by the regions of one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableUsage {
    pub size: u64,
    pub regions: usize,
}

/// Region sizes from a report, rolled up per table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaceUseSummary {
    tables: BTreeMap<TableName, TableUsage>,
}

impl SpaceUseSummary {
    pub fn from_samples<'a>(samples: impl IntoIterator<Item = &'a RegionSizeSample>) -> Self {
        let mut tables: BTreeMap<TableName, TableUsage> = BTreeMap::new();
        for sample in samples {
            let usage = tables.entry(sample.region.table().clone()).or_default();
            usage.size = usage.size.saturating_add(sample.size);
            usage.regions += 1;
        }
        Self { tables }
    }

    pub fn table(&self, table: &TableName) -> Option<&TableUsage> {
        self.tables.get(table)
    }

    /// Tables in name order.
    pub fn tables(&self) -> impl Iterator<Item = (&TableName, &TableUsage)> {
        self.tables.iter()
    }

    pub fn total_size(&self) -> u64 {
        self.tables
            .values()
            .fold(0u64, |total, usage| total.saturating_add(usage.size))
    }

    pub fn region_count(&self) -> usize {
        self.tables.values().map(|usage| usage.regions).sum()
    }
}
