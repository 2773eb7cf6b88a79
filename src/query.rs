//! Read-only queries over a [`Snapshot`].
//!
//! Every function here is pure: it borrows a snapshot and never touches the
//! store, so the same snapshot always answers the same way.

use crate::core::{FundHouseGroup, SchemeRecord};
use crate::store::snapshot::Snapshot;
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_LIMIT: usize = 100;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;
/// Shorter autocomplete queries return no suggestions.
pub const MIN_SUGGESTION_QUERY_LEN: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Query parameter \"q\" is required")]
    MissingQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// A window of a result set. `total_count` counts every match, not just the
/// ones inside the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub total_count: usize,
    pub limit: usize,
    pub offset: usize,
    pub items: Vec<T>,
}

fn paginate<T>(matches: impl IntoIterator<Item = T>, request: PageRequest) -> Page<T> {
    let end = request.offset.saturating_add(request.limit);
    let mut total_count = 0;
    let mut items = Vec::new();
    for item in matches {
        if (request.offset..end).contains(&total_count) {
            items.push(item);
        }
        total_count += 1;
    }
    Page {
        total_count,
        limit: request.limit,
        offset: request.offset,
        items,
    }
}

/// A validated, lower-cased search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn parse(raw: Option<&str>) -> Result<Self, QueryError> {
        match raw.map(str::trim) {
            Some(term) if !term.is_empty() => Ok(SearchTerm(term.to_lowercase())),
            _ => Err(QueryError::MissingQuery),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.0)
    }

    fn matches_record(&self, record: &SchemeRecord) -> bool {
        self.matches(&record.scheme_name)
            || record
                .fund_house
                .as_deref()
                .is_some_and(|house| self.matches(house))
    }
}

/// All records in serial order, optionally restricted to fund houses whose
/// name contains `fund_house` (case-insensitive). A blank filter is ignored.
pub fn list_all<'a>(
    snapshot: &'a Snapshot,
    fund_house: Option<&str>,
    request: PageRequest,
) -> Page<&'a SchemeRecord> {
    let filter = fund_house
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_lowercase);

    match filter {
        Some(needle) => {
            let matching_groups = snapshot
                .groups()
                .iter()
                .filter(|group| group.fund_house.to_lowercase().contains(&needle));
            paginate(
                matching_groups.flat_map(|group| snapshot.group_records(group)),
                request,
            )
        }
        None => paginate(snapshot.records(), request),
    }
}

/// Records whose scheme name or fund house contains `term`.
pub fn search<'a>(
    snapshot: &'a Snapshot,
    term: &SearchTerm,
    request: PageRequest,
) -> Page<&'a SchemeRecord> {
    paginate(
        snapshot
            .records()
            .iter()
            .filter(|record| term.matches_record(record)),
        request,
    )
}

pub fn by_id(snapshot: &Snapshot, serial_number: u32) -> Option<&SchemeRecord> {
    snapshot.get(serial_number)
}

/// Distinct scheme names or fund houses containing `query`, in serial order.
/// A scheme name is preferred over its fund house when both match.
pub fn suggest<'a>(snapshot: &'a Snapshot, query: &str, limit: usize) -> Vec<&'a str> {
    let query = query.trim();
    if query.chars().count() < MIN_SUGGESTION_QUERY_LEN {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    let mut suggestions: Vec<&str> = Vec::new();
    for record in snapshot.records() {
        if suggestions.len() >= limit {
            break;
        }
        let candidate = if record.scheme_name.to_lowercase().contains(&needle) {
            Some(record.scheme_name.as_str())
        } else {
            record
                .fund_house
                .as_deref()
                .filter(|house| house.to_lowercase().contains(&needle))
        };
        if let Some(candidate) = candidate
            && !suggestions.contains(&candidate)
        {
            suggestions.push(candidate);
        }
    }
    suggestions
}

/// Fund-house groups in file order.
pub fn fund_houses(snapshot: &Snapshot, request: PageRequest) -> Page<&FundHouseGroup> {
    paginate(snapshot.groups(), request)
}
