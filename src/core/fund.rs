//! Scheme records and fund-house groups produced by a feed parse

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Plan variant of a scheme, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemeType {
    Direct,
    Regular,
    Unknown,
}

impl Display for SchemeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SchemeType::Direct => "Direct",
                SchemeType::Regular => "Regular",
                SchemeType::Unknown => "Unknown",
            }
        )
    }
}

/// Broad asset category of a scheme, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemeCategory {
    #[serde(rename = "EQUITY")]
    Equity,
    #[serde(rename = "DEBT")]
    Debt,
    #[serde(rename = "HYBRID")]
    Hybrid,
    #[serde(rename = "LIQUID")]
    Liquid,
    #[serde(rename = "INDEX")]
    Index,
    #[serde(rename = "ELSS")]
    Elss,
    Others,
}

impl Display for SchemeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SchemeCategory::Equity => "EQUITY",
                SchemeCategory::Debt => "DEBT",
                SchemeCategory::Hybrid => "HYBRID",
                SchemeCategory::Liquid => "LIQUID",
                SchemeCategory::Index => "INDEX",
                SchemeCategory::Elss => "ELSS",
                SchemeCategory::Others => "Others",
            }
        )
    }
}

/// One scheme line of the feed with its fund house inlined.
///
/// Records are immutable once built; a new parse produces new records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeRecord {
    pub serial_number: u32,
    /// `None` only for scheme lines that precede every fund-house header.
    pub fund_house: Option<String>,
    pub scheme_name: String,
    pub scheme_code: String,
    pub nav: Option<f64>,
    pub nav_date: Option<NaiveDate>,
    pub scheme_type: SchemeType,
    pub scheme_category: SchemeCategory,
    pub isin_payout: Option<String>,
    pub isin_reinvest: Option<String>,
}

/// A fund-house header together with the schemes listed under it.
///
/// The schemes of a group always occupy a contiguous serial range, so the
/// group only records where that range starts and how long it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundHouseGroup {
    pub fund_house: String,
    pub first_serial: u32,
    pub scheme_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_with_feed_labels() {
        let json = serde_json::to_string(&[
            SchemeCategory::Equity,
            SchemeCategory::Elss,
            SchemeCategory::Others,
        ])
        .unwrap();
        assert_eq!(json, r#"["EQUITY","ELSS","Others"]"#);
    }

    #[test]
    fn test_record_serializes_nulls_and_iso_date() {
        let record = SchemeRecord {
            serial_number: 1,
            fund_house: Some("Axis Mutual Fund".to_string()),
            scheme_name: "Axis Liquid Fund - Direct Plan".to_string(),
            scheme_code: "120389".to_string(),
            nav: None,
            nav_date: NaiveDate::from_ymd_opt(2024, 1, 5),
            scheme_type: SchemeType::Direct,
            scheme_category: SchemeCategory::Liquid,
            isin_payout: Some("INF846K01CX4".to_string()),
            isin_reinvest: None,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["nav"], serde_json::Value::Null);
        assert_eq!(value["nav_date"], "2024-01-05");
        assert_eq!(value["scheme_type"], "Direct");
        assert_eq!(value["scheme_category"], "LIQUID");
        assert_eq!(value["isin_reinvest"], serde_json::Value::Null);
    }
}
