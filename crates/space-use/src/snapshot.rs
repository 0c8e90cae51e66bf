//! Point-in-time region size measurements.

use std::collections::{HashMap, hash_map};

use crate::{BuildError, RegionInfo, SpaceUseReport, build_report};

/// Sizes measured for the regions hosted by a node, keyed by region.
///
/// A region may be present without a measurement (the sampler could not size
/// it) and a raw measurement may be negative; both are rejected when the
/// snapshot is turned into a report, never silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageSnapshot {
    sizes: HashMap<RegionInfo, Option<i64>>,
}

impl UsageSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sizes: HashMap::with_capacity(capacity),
        }
    }

    /// Record the measured size of a region, replacing any earlier value.
    pub fn insert(&mut self, region: RegionInfo, size: i64) -> Option<Option<i64>> {
        self.sizes.insert(region, Some(size))
    }

    /// Record a region whose size could not be measured.
    pub fn insert_missing(&mut self, region: RegionInfo) -> Option<Option<i64>> {
        self.sizes.insert(region, None)
    }

    /// Record a possibly absent measurement.
    pub fn record(&mut self, region: RegionInfo, size: Option<i64>) -> Option<Option<i64>> {
        self.sizes.insert(region, size)
    }

    pub fn get(&self, region: &RegionInfo) -> Option<Option<i64>> {
        self.sizes.get(region).copied()
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, RegionInfo, Option<i64>> {
        self.sizes.iter()
    }

    /// Build a report from this snapshot with the default builder settings.
    pub fn to_report(&self) -> Result<SpaceUseReport, BuildError> {
        build_report(Some(self))
    }
}

impl FromIterator<(RegionInfo, i64)> for UsageSnapshot {
    fn from_iter<T: IntoIterator<Item = (RegionInfo, i64)>>(iter: T) -> Self {
        Self {
            sizes: iter
                .into_iter()
                .map(|(region, size)| (region, Some(size)))
                .collect(),
        }
    }
}

impl FromIterator<(RegionInfo, Option<i64>)> for UsageSnapshot {
    fn from_iter<T: IntoIterator<Item = (RegionInfo, Option<i64>)>>(iter: T) -> Self {
        Self {
            sizes: iter.into_iter().collect(),
        }
    }
}

impl Extend<(RegionInfo, i64)> for UsageSnapshot {
    fn extend<T: IntoIterator<Item = (RegionInfo, i64)>>(&mut self, iter: T) {
        self.sizes
            .extend(iter.into_iter().map(|(region, size)| (region, Some(size))));
    }
}

impl<'a> IntoIterator for &'a UsageSnapshot {
    type Item = (&'a RegionInfo, &'a Option<i64>);
    type IntoIter = hash_map::Iter<'a, RegionInfo, Option<i64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sizes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(start: &'static [u8]) -> RegionInfo {
        RegionInfo::builder("table1".parse().unwrap())
            .with_start_key(start)
            .build()
    }

    #[test]
    fn test_keys_are_unique() {
        let mut snapshot = UsageSnapshot::new();
        assert_eq!(snapshot.insert(region(b"a"), 1), None);
        assert_eq!(snapshot.insert(region(b"a"), 2), Some(Some(1)));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get(&region(b"a")), Some(Some(2)));
    }

    #[test]
    fn test_missing_measurement_is_kept() {
        let mut snapshot = UsageSnapshot::new();
        snapshot.insert_missing(region(b"a"));
        assert_eq!(snapshot.get(&region(b"a")), Some(None));
        assert_eq!(snapshot.get(&region(b"b")), None);
    }

    #[test]
    fn test_collect_from_pairs() {
        let snapshot: UsageSnapshot = [(region(b"a"), 10i64), (region(b"b"), 0i64)].into_iter().collect();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.iter().filter(|(_, size)| size.is_some()).count(), 2);
    }
}
