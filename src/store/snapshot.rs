use crate::core::{FundHouseGroup, SchemeRecord};
use crate::feed::ParsedFeed;
use chrono::{DateTime, Duration, Utc};

/// One complete, immutable result of a feed parse.
///
/// `records[i]` always carries serial number `i + 1`, which makes serial
/// lookup an index operation.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    version: u64,
    fetched_at: Option<DateTime<Utc>>,
    records: Vec<SchemeRecord>,
    groups: Vec<FundHouseGroup>,
}

impl Snapshot {
    /// The snapshot a store starts with: version 0, no records.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(version: u64, fetched_at: DateTime<Utc>, feed: ParsedFeed) -> Self {
        debug_assert!(
            feed.records
                .iter()
                .enumerate()
                .all(|(i, r)| r.serial_number as usize == i + 1)
        );
        Snapshot {
            version,
            fetched_at: Some(fetched_at),
            records: feed.records,
            groups: feed.groups,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn records(&self) -> &[SchemeRecord] {
        &self.records
    }

    pub fn groups(&self) -> &[FundHouseGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, serial_number: u32) -> Option<&SchemeRecord> {
        let index = serial_number.checked_sub(1)?;
        self.records.get(index as usize)
    }

    /// Schemes listed under `group`, in serial order.
    pub fn group_records(&self, group: &FundHouseGroup) -> &[SchemeRecord] {
        let start = (group.first_serial as usize).saturating_sub(1);
        let end = (start + group.scheme_count).min(self.records.len());
        self.records.get(start..end).unwrap_or_default()
    }

    /// True when the snapshot was never fetched or was fetched more than
    /// `max_age` before `now`.
    pub fn is_stale(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        self.fetched_at
            .is_none_or(|fetched_at| now - fetched_at >= max_age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::parse_feed;

    const FEED: &str = "\
House A
1;-;-;Alpha Equity Fund;10.0;01-Jan-2024
2;-;-;Alpha Liquid Fund;11.0;01-Jan-2024
House B
3;-;-;Beta Gilt Fund;12.0;01-Jan-2024
";

    #[test]
    fn test_get_by_serial() {
        let snapshot = Snapshot::new(1, Utc::now(), parse_feed(FEED));

        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.get(1).unwrap().scheme_name, "Alpha Equity Fund");
        assert_eq!(snapshot.get(3).unwrap().scheme_name, "Beta Gilt Fund");
        assert!(snapshot.get(0).is_none());
        assert!(snapshot.get(4).is_none());
    }

    #[test]
    fn test_group_records() {
        let snapshot = Snapshot::new(1, Utc::now(), parse_feed(FEED));

        let groups = snapshot.groups();
        assert_eq!(groups.len(), 2);
        let names: Vec<&str> = snapshot
            .group_records(&groups[0])
            .iter()
            .map(|r| r.scheme_name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha Equity Fund", "Alpha Liquid Fund"]);
        assert_eq!(snapshot.group_records(&groups[1]).len(), 1);
    }

    #[test]
    fn test_staleness() {
        let now = Utc::now();
        let max_age = Duration::minutes(5);

        assert!(Snapshot::empty().is_stale(max_age, now));

        let snapshot = Snapshot::new(1, now - Duration::minutes(1), parse_feed(FEED));
        assert!(!snapshot.is_stale(max_age, now));
        assert!(snapshot.is_stale(max_age, now + Duration::minutes(4)));
    }
}
