use super::AppState;
use super::response::{self, ApiError};
use crate::core::{FundHouseGroup, SchemeRecord};
use crate::query::{self, DEFAULT_SUGGESTION_LIMIT, Page, PageRequest, SearchTerm};
use crate::store::snapshot::Snapshot;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub fund_house: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize)]
struct FundList<'a> {
    total_count: usize,
    limit: usize,
    offset: usize,
    funds: Vec<&'a SchemeRecord>,
}

impl<'a> From<Page<&'a SchemeRecord>> for FundList<'a> {
    fn from(page: Page<&'a SchemeRecord>) -> Self {
        FundList {
            total_count: page.total_count,
            limit: page.limit,
            offset: page.offset,
            funds: page.items,
        }
    }
}

#[derive(Debug, Serialize)]
struct FundHouseList<'a> {
    total_count: usize,
    limit: usize,
    offset: usize,
    fund_houses: Vec<&'a FundHouseGroup>,
}

#[derive(Debug, Serialize)]
struct Suggestions<'a> {
    suggestions: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct Health {
    snapshot_version: u64,
    record_count: usize,
    fetched_at: Option<DateTime<Utc>>,
}

impl AppState {
    fn page(&self, offset: Option<usize>, limit: Option<usize>) -> PageRequest {
        PageRequest {
            offset: offset.unwrap_or(0),
            limit: limit.unwrap_or(self.default_limit),
        }
    }

    async fn current_snapshot(&self) -> Result<Arc<Snapshot>, ApiError> {
        self.service.snapshot().await.map_err(|e| {
            error!(error = ?e, "No NAV snapshot available");
            ApiError::FetchFailed
        })
    }
}

pub async fn list_funds(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let request = state.page(params.offset, params.limit);
    let snapshot = state.current_snapshot().await?;

    let page = query::list_all(&snapshot, params.fund_house.as_deref(), request);
    debug!(total = page.total_count, "Listed funds");
    Ok(response::success(FundList::from(page)))
}

pub async fn get_fund(
    State(state): State<Arc<AppState>>,
    serial_number: Result<Path<u32>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(serial_number) = serial_number?;
    let snapshot = state.current_snapshot().await?;

    let record = query::by_id(&snapshot, serial_number).ok_or(ApiError::NotFound)?;
    Ok(response::success(record))
}

pub async fn search_funds(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let term = SearchTerm::parse(params.q.as_deref())?;
    let request = state.page(params.offset, params.limit);
    let snapshot = state.current_snapshot().await?;

    let page = query::search(&snapshot, &term, request);
    debug!(term = term.as_str(), total = page.total_count, "Searched funds");
    Ok(response::success(FundList::from(page)))
}

pub async fn autocomplete(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let q = params.q.unwrap_or_default();
    let limit = params.limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT);
    if q.trim().chars().count() < query::MIN_SUGGESTION_QUERY_LEN {
        return Ok(response::success(Suggestions {
            suggestions: Vec::new(),
        }));
    }
    let snapshot = state.current_snapshot().await?;

    Ok(response::success(Suggestions {
        suggestions: query::suggest(&snapshot, &q, limit),
    }))
}

pub async fn list_fund_houses(
    State(state): State<Arc<AppState>>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let request = state.page(params.offset, params.limit);
    let snapshot = state.current_snapshot().await?;

    let page = query::fund_houses(&snapshot, request);
    Ok(response::success(FundHouseList {
        total_count: page.total_count,
        limit: page.limit,
        offset: page.offset,
        fund_houses: page.items,
    }))
}

/// Reports the installed snapshot without refreshing it.
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    let snapshot = state.service.store().snapshot();
    response::success(Health {
        snapshot_version: snapshot.version(),
        record_count: snapshot.len(),
        fetched_at: snapshot.fetched_at(),
    })
}
