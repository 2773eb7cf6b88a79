//! Tokenizer for the AMFI `NAVAll.txt` flat file.
//!
//! The feed interleaves fund-house header lines (no `;`) with scheme lines
//! (`code;isin payout;isin reinvest;name;nav;date`). Parsing is best effort:
//! a malformed line is logged and skipped, it never aborts the parse.

use super::{classify, normalize};
use crate::core::{FundHouseGroup, SchemeRecord};
use tracing::{debug, warn};

const COLUMN_HEADER_MARKER: &str = "Scheme Code;ISIN Div Payout";
const FIELD_SEPARATOR: char = ';';
const MIN_SCHEME_FIELDS: usize = 6;

/// Output of a single pass over the feed. `records` are in serial order,
/// serials run `1..=records.len()` without gaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFeed {
    pub records: Vec<SchemeRecord>,
    pub groups: Vec<FundHouseGroup>,
    pub skipped_lines: usize,
}

struct OpenGroup {
    fund_house: String,
    first_serial: Option<u32>,
    scheme_count: usize,
}

impl OpenGroup {
    fn new(fund_house: &str) -> Self {
        OpenGroup {
            fund_house: fund_house.to_string(),
            first_serial: None,
            scheme_count: 0,
        }
    }

    /// A header with no schemes under it yields no group.
    fn close(self) -> Option<FundHouseGroup> {
        let first_serial = self.first_serial?;
        Some(FundHouseGroup {
            fund_house: self.fund_house,
            first_serial,
            scheme_count: self.scheme_count,
        })
    }
}

pub fn parse_feed(raw: &str) -> ParsedFeed {
    let mut feed = ParsedFeed::default();
    let mut current: Option<OpenGroup> = None;
    let mut next_serial: u32 = 1;

    for (index, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.contains(COLUMN_HEADER_MARKER) {
            debug!(line = index + 1, "Skipping column header");
            continue;
        }

        if !line.contains(FIELD_SEPARATOR) {
            if let Some(group) = current.take().and_then(OpenGroup::close) {
                feed.groups.push(group);
            }
            current = Some(OpenGroup::new(line));
            continue;
        }

        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() < MIN_SCHEME_FIELDS {
            warn!(
                line = index + 1,
                fields = fields.len(),
                "Skipping scheme line with too few fields: {}",
                line
            );
            feed.skipped_lines += 1;
            continue;
        }

        let serial = next_serial;
        next_serial += 1;

        let fund_house = current.as_mut().map(|group| {
            group.first_serial.get_or_insert(serial);
            group.scheme_count += 1;
            group.fund_house.clone()
        });
        feed.records.push(build_record(serial, fund_house, &fields));
    }

    if let Some(group) = current.and_then(OpenGroup::close) {
        feed.groups.push(group);
    }

    debug!(
        records = feed.records.len(),
        groups = feed.groups.len(),
        skipped = feed.skipped_lines,
        "Parsed NAV feed"
    );
    feed
}

fn build_record(serial_number: u32, fund_house: Option<String>, fields: &[&str]) -> SchemeRecord {
    let scheme_name = fields[3].trim().to_string();
    SchemeRecord {
        serial_number,
        fund_house,
        scheme_code: fields[0].trim().to_string(),
        isin_payout: normalize::parse_isin(fields[1]),
        isin_reinvest: normalize::parse_isin(fields[2]),
        nav: normalize::parse_nav(fields[4]),
        nav_date: normalize::parse_nav_date(fields[5]),
        scheme_type: classify::scheme_type(&scheme_name),
        scheme_category: classify::scheme_category(&scheme_name),
        scheme_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SchemeCategory, SchemeType};
    use chrono::NaiveDate;

    const SAMPLE_FEED: &str = "\
Scheme Code;ISIN Div Payout/ ISIN Growth;ISIN Div Reinvestment;Scheme Name;Net Asset Value;Date

Open Ended Schemes(Debt Scheme - Banking and PSU Fund)

Aditya Birla Sun Life Mutual Fund

119551;INF209KA12Z1;INF209KA13Z9;Aditya Birla Sun Life Banking & PSU Debt Fund - DIRECT - IDCW;105.7683;05-Jan-2024
119552;INF209K01YN0;-;Aditya Birla Sun Life Liquid Fund - Regular Plan;N.A.;05-Jan-2024

Axis Mutual Fund

120389;INF846K01CX4;-;Axis Nifty 50 ETF;231.12;05-Jan-2024
";

    #[test]
    fn test_parse_sample_feed() {
        let feed = parse_feed(SAMPLE_FEED);

        assert_eq!(feed.records.len(), 3);
        assert_eq!(feed.skipped_lines, 0);
        assert_eq!(
            feed.groups,
            vec![
                FundHouseGroup {
                    fund_house: "Aditya Birla Sun Life Mutual Fund".to_string(),
                    first_serial: 1,
                    scheme_count: 2,
                },
                FundHouseGroup {
                    fund_house: "Axis Mutual Fund".to_string(),
                    first_serial: 3,
                    scheme_count: 1,
                },
            ]
        );

        let first = &feed.records[0];
        assert_eq!(first.serial_number, 1);
        assert_eq!(
            first.fund_house.as_deref(),
            Some("Aditya Birla Sun Life Mutual Fund")
        );
        assert_eq!(first.scheme_code, "119551");
        assert_eq!(first.isin_payout.as_deref(), Some("INF209KA12Z1"));
        assert_eq!(first.isin_reinvest.as_deref(), Some("INF209KA13Z9"));
        assert_eq!(first.nav, Some(105.7683));
        assert_eq!(first.nav_date, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(first.scheme_type, SchemeType::Direct);
        assert_eq!(first.scheme_category, SchemeCategory::Debt);

        let second = &feed.records[1];
        assert_eq!(second.nav, None);
        assert_eq!(second.isin_reinvest, None);
        assert_eq!(second.scheme_type, SchemeType::Regular);
        assert_eq!(second.scheme_category, SchemeCategory::Liquid);

        let third = &feed.records[2];
        assert_eq!(third.serial_number, 3);
        assert_eq!(third.fund_house.as_deref(), Some("Axis Mutual Fund"));
        assert_eq!(third.scheme_type, SchemeType::Unknown);
        assert_eq!(third.scheme_category, SchemeCategory::Index);
    }

    #[test]
    fn test_serials_are_contiguous_in_file_order() {
        let mut raw = String::new();
        for house in 0..4 {
            raw.push_str(&format!("Fund House {house}\n"));
            for scheme in 0..5 {
                raw.push_str(&format!(
                    "{house}{scheme};-;-;Scheme {house}-{scheme};1.0;01-Jan-2024\n"
                ));
            }
            raw.push_str("1;2;3\n");
        }

        let feed = parse_feed(&raw);
        let serials: Vec<u32> = feed.records.iter().map(|r| r.serial_number).collect();
        assert_eq!(serials, (1..=20).collect::<Vec<u32>>());
        assert_eq!(feed.skipped_lines, 4);
        assert_eq!(feed.records[7].scheme_name, "Scheme 1-2");
        for (i, group) in feed.groups.iter().enumerate() {
            assert_eq!(group.first_serial, i as u32 * 5 + 1);
            assert_eq!(group.scheme_count, 5);
        }
    }

    #[test]
    fn test_empty_header_contributes_no_group() {
        let raw = "\
Open Ended Schemes(Equity Scheme - Large Cap Fund)
HDFC Mutual Fund
100;-;-;HDFC Top 100 Fund;900.1;05-Jan-2024
Close Ended Schemes
Empty Fund House
ICICI Prudential Mutual Fund
200;-;-;ICICI Prudential Bluechip Fund;80.5;05-Jan-2024
";
        let feed = parse_feed(raw);

        let names: Vec<&str> = feed.groups.iter().map(|g| g.fund_house.as_str()).collect();
        assert_eq!(names, vec!["HDFC Mutual Fund", "ICICI Prudential Mutual Fund"]);
        assert_eq!(feed.records[1].serial_number, 2);
        assert_eq!(
            feed.records[1].fund_house.as_deref(),
            Some("ICICI Prudential Mutual Fund")
        );
    }

    #[test]
    fn test_short_line_skipped_and_bad_nav_kept() {
        let raw = "\
Some Fund House
123;ISIN1;-;SchemeA;abc
123;ISIN1;-;SchemeA;abc;01-Jan-2024
";
        let feed = parse_feed(raw);

        assert_eq!(feed.skipped_lines, 1);
        assert_eq!(feed.records.len(), 1);
        let record = &feed.records[0];
        assert_eq!(record.serial_number, 1);
        assert_eq!(record.nav, None);
        assert_eq!(record.isin_payout.as_deref(), Some("ISIN1"));
        assert_eq!(record.isin_reinvest, None);
        assert_eq!(record.nav_date, NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn test_scheme_before_any_header_has_no_fund_house() {
        let raw = "\
1;-;-;Orphan Scheme;10.0;01-Jan-2024
Real Fund House
2;-;-;Adopted Scheme;11.0;01-Jan-2024
";
        let feed = parse_feed(raw);

        assert_eq!(feed.records.len(), 2);
        assert_eq!(feed.records[0].fund_house, None);
        assert_eq!(feed.records[1].fund_house.as_deref(), Some("Real Fund House"));
        assert_eq!(feed.groups.len(), 1);
        assert_eq!(feed.groups[0].first_serial, 2);
    }

    #[test]
    fn test_extra_fields_and_crlf_are_tolerated() {
        let raw = "House\r\n1;-;-;  Padded Name  ; 12.5 ;02-Feb-2024;extra\r\n\r\n";
        let feed = parse_feed(raw);

        assert_eq!(feed.records.len(), 1);
        assert_eq!(feed.records[0].scheme_name, "Padded Name");
        assert_eq!(feed.records[0].nav, Some(12.5));
        assert_eq!(feed.records[0].fund_house.as_deref(), Some("House"));
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse_feed(SAMPLE_FEED), parse_feed(SAMPLE_FEED));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_feed(""), ParsedFeed::default());
    }
}
