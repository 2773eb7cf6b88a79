//! Field fix-ups for raw feed values. Every function here is total: a value
//! that cannot be interpreted becomes `None` instead of an error.

use chrono::NaiveDate;
use tracing::debug;

/// Date layout used by the feed, e.g. `05-Jan-2024`.
const FEED_DATE_FORMAT: &str = "%d-%b-%Y";
const NAV_NOT_AVAILABLE: &str = "N.A.";
const ISIN_NOT_AVAILABLE: &str = "-";

pub fn parse_nav(raw: &str) -> Option<f64> {
    let value = raw.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(NAV_NOT_AVAILABLE) {
        return None;
    }

    match value.parse::<f64>() {
        Ok(nav) if nav.is_finite() => Some(nav),
        Ok(_) => {
            debug!("Non-finite NAV '{}', storing null", value);
            None
        }
        Err(e) => {
            debug!("Unparsable NAV '{}' ({}), storing null", value, e);
            None
        }
    }
}

pub fn parse_nav_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(value, FEED_DATE_FORMAT)
        .inspect_err(|e| debug!("Unparsable NAV date '{value}' ({e}), storing null"))
        .ok()
}

pub fn parse_isin(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() || value == ISIN_NOT_AVAILABLE {
        None
    } else {
        Some(value.to_string())
    }
}
