//! Keyword search across vendors, departments and programs.

use axum::{
    Json,
    extract::{Query, State},
};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::app::AppState;
use crate::entities::{Department, Program, VendorTotal, department, program, vendor_total};
use crate::errors::ApiError;
use crate::filter::{FilterExpression, build_prefilter, parse};
use crate::models::{DepartmentHit, ProgramHit, SearchParams, SearchResponse};
use crate::pagination::parse_positive;

const DEFAULT_SEARCH_LIMIT: u64 = 10;
const MAX_SEARCH_LIMIT: u64 = 50;
/// Rows fetched per round trip while scanning for matches.
const SCAN_CHUNK_ROWS: u64 = 200;

/// Walk an ordered query in chunks until `limit` rows pass `keep` or the
/// table runs out.
///
/// The SQL prefilter is only a coarse narrowing (and is skipped entirely for
/// some non-ASCII terms), so a single bounded fetch could miss matches that
/// sort further down.
async fn collect_matches<T, F, Fut>(
    mut fetch_chunk: F,
    keep: impl Fn(&T) -> bool,
    limit: usize,
) -> Result<Vec<T>, DbErr>
where
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = Result<Vec<T>, DbErr>>,
{
    let mut hits = Vec::new();
    let mut offset = 0;
    while hits.len() < limit {
        let chunk = fetch_chunk(offset).await?;
        let exhausted = count(chunk.len()) < SCAN_CHUNK_ROWS;
        hits.extend(chunk.into_iter().filter(|row| keep(row)));
        if exhausted {
            break;
        }
        offset += SCAN_CHUNK_ROWS;
    }
    hits.truncate(limit);
    Ok(hits)
}

fn count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

async fn search_vendors(
    db: &DatabaseConnection,
    expression: &FilterExpression,
    limit: usize,
) -> Result<Vec<String>, DbErr> {
    let mut query = VendorTotal::find()
        .select_only()
        .column(vendor_total::Column::VendorName)
        .distinct()
        .order_by_asc(vendor_total::Column::VendorName);
    if let Some(condition) = build_prefilter(vendor_total::Column::VendorName, expression) {
        query = query.filter(condition);
    }

    collect_matches(
        |offset| {
            query
                .clone()
                .offset(offset)
                .limit(SCAN_CHUNK_ROWS)
                .into_tuple::<String>()
                .all(db)
        },
        |name| expression.matches(name),
        limit,
    )
    .await
}

async fn search_departments(
    db: &DatabaseConnection,
    expression: &FilterExpression,
    limit: usize,
) -> Result<Vec<DepartmentHit>, DbErr> {
    let mut query = Department::find()
        .order_by_asc(department::Column::Name)
        .order_by_asc(department::Column::Id);
    if let Some(condition) = build_prefilter(department::Column::Name, expression) {
        query = query.filter(condition);
    }

    let rows = collect_matches(
        |offset| query.clone().offset(offset).limit(SCAN_CHUNK_ROWS).all(db),
        |row: &department::Model| expression.matches(&row.name),
        limit,
    )
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| DepartmentHit {
            name: row.name,
            slug: row.slug,
        })
        .collect())
}

async fn search_programs(
    db: &DatabaseConnection,
    expression: &FilterExpression,
    limit: usize,
) -> Result<Vec<ProgramHit>, DbErr> {
    let mut query = Program::find()
        .order_by_asc(program::Column::ProgramName)
        .order_by_asc(program::Column::Id);
    if let Some(condition) = build_prefilter(program::Column::ProgramName, expression) {
        query = query.filter(condition);
    }

    let rows = collect_matches(
        |offset| query.clone().offset(offset).limit(SCAN_CHUNK_ROWS).all(db),
        |row: &program::Model| expression.matches(&row.program_name),
        limit,
    )
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| ProgramHit {
            code: row.program_code,
            name: row.program_name,
            department: row.department_name,
        })
        .collect())
}

/// Search names across all three tables.
///
/// `q` uses the same grammar as the listing `filter`. Each group holds at
/// most `limit` hits (default 10, max 50). A blank `q` returns empty groups
/// without touching the database.
///
/// # Errors
///
/// 500 with a sanitized message when any of the queries fails.
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Grouped search hits", body = SearchResponse),
        (status = 500, description = "Database error")
    ),
    tag = "search"
)]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params.q.as_deref().map(str::trim).unwrap_or_default().to_string();
    if query.is_empty() {
        return Ok(Json(SearchResponse::default()));
    }

    let limit = parse_positive(params.limit.as_deref())
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .min(MAX_SEARCH_LIMIT);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let expression = parse(&query);

    let (vendors, departments, programs) = tokio::try_join!(
        search_vendors(&state.db, &expression, limit),
        search_departments(&state.db, &expression, limit),
        search_programs(&state.db, &expression, limit),
    )?;

    let total = vendors.len() + departments.len() + programs.len();
    tracing::debug!(terms = expression.terms().len(), total, "Keyword search");

    Ok(Json(SearchResponse {
        query,
        total,
        vendors,
        departments,
        programs,
    }))
}
