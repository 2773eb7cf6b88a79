//! Keyword classification of scheme names.
//!
//! Both classifiers are driven by ordered rule tables evaluated by
//! [`first_match`]: the first label with any keyword contained in the
//! upper-cased name wins, otherwise the fallback label is returned.

use crate::core::{SchemeCategory, SchemeType};

/// A label and the keywords that select it.
pub type Rule<T> = (T, &'static [&'static str]);

const SCHEME_TYPE_RULES: &[Rule<SchemeType>] = &[
    (SchemeType::Direct, &["DIRECT", "DIR."]),
    (SchemeType::Regular, &["REGULAR", "REG."]),
];

// Keyword sets overlap (e.g. "EQUITY SAVINGS" vs "EQUITY"), so order decides.
const SCHEME_CATEGORY_RULES: &[Rule<SchemeCategory>] = &[
    (
        SchemeCategory::Equity,
        &[
            "EQUITY",
            "LARGE CAP",
            "MID CAP",
            "SMALL CAP",
            "MULTICAP",
            "FLEXI CAP",
        ],
    ),
    (
        SchemeCategory::Debt,
        &["DEBT", "GILT", "INCOME", "CORPORATE BOND", "CREDIT RISK"],
    ),
    (
        SchemeCategory::Hybrid,
        &["HYBRID", "BALANCED", "EQUITY SAVINGS"],
    ),
    (
        SchemeCategory::Liquid,
        &["LIQUID", "OVERNIGHT", "MONEY MARKET"],
    ),
    (SchemeCategory::Index, &["INDEX", "ETF", "NIFTY", "SENSEX"]),
    (SchemeCategory::Elss, &["ELSS", "TAX SAV"]),
];

pub fn first_match<T: Copy>(name: &str, rules: &[Rule<T>], fallback: T) -> T {
    let upper = name.trim().to_uppercase();
    rules
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| upper.contains(keyword)))
        .map_or(fallback, |(label, _)| *label)
}

pub fn scheme_type(scheme_name: &str) -> SchemeType {
    first_match(scheme_name, SCHEME_TYPE_RULES, SchemeType::Unknown)
}

pub fn scheme_category(scheme_name: &str) -> SchemeCategory {
    first_match(scheme_name, SCHEME_CATEGORY_RULES, SchemeCategory::Others)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_type() {
        assert_eq!(scheme_type("XYZ Fund - Direct Plan"), SchemeType::Direct);
        assert_eq!(scheme_type("XYZ Fund - Regular Plan"), SchemeType::Regular);
        assert_eq!(scheme_type("XYZ Fund"), SchemeType::Unknown);
        assert_eq!(scheme_type("XYZ Fund Dir. Growth"), SchemeType::Direct);
        assert_eq!(scheme_type("xyz fund reg. growth"), SchemeType::Regular);
    }

    #[test]
    fn test_direct_wins_over_regular() {
        assert_eq!(
            scheme_type("XYZ Regular Savings Fund - Direct Plan"),
            SchemeType::Direct
        );
    }

    #[test]
    fn test_scheme_category() {
        assert_eq!(
            scheme_category("ABC Large Cap Equity Fund"),
            SchemeCategory::Equity
        );
        assert_eq!(scheme_category("ABC Liquid Fund"), SchemeCategory::Liquid);
        assert_eq!(scheme_category("ABC Gold ETF"), SchemeCategory::Index);
        assert_eq!(scheme_category("ABC Gilt Fund"), SchemeCategory::Debt);
        assert_eq!(
            scheme_category("ABC Balanced Advantage Fund"),
            SchemeCategory::Hybrid
        );
        assert_eq!(
            scheme_category("ABC Tax Saver Fund"),
            SchemeCategory::Elss
        );
        assert_eq!(
            scheme_category("ABC Fixed Maturity Plan Series 12"),
            SchemeCategory::Others
        );
    }

    #[test]
    fn test_category_order_breaks_ties() {
        // Matches both EQUITY and INDEX keyword sets
        assert_eq!(
            scheme_category("ABC Nifty 50 Index Equity Fund"),
            SchemeCategory::Equity
        );
        // "EQUITY SAVINGS" is a hybrid keyword but "EQUITY" is checked first
        assert_eq!(
            scheme_category("ABC Equity Savings Fund"),
            SchemeCategory::Equity
        );
        assert_eq!(
            scheme_category("ABC ELSS Tax Saver Index Fund"),
            SchemeCategory::Index
        );
    }

    #[test]
    fn test_first_match_with_custom_table() {
        let rules: &[Rule<u8>] = &[(1, &["ALPHA"]), (2, &["BETA", "ALPHA"])];
        assert_eq!(first_match("beta alpha", rules, 0), 1);
        assert_eq!(first_match("beta", rules, 0), 2);
        assert_eq!(first_match("gamma", rules, 0), 0);
    }
}
