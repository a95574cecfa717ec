use axum::{
    Json,
    extract::{Query, State},
};
use hyper::{
    HeaderMap,
    header::{CACHE_CONTROL, HeaderValue},
};

use crate::app::AppState;
use crate::entities::{department, program, vendor_total};
use crate::errors::ListingError;
use crate::filter::parse;
use crate::models::{ListParams, ListResponse, Summary};
use crate::pagination::{Pagination, calculate_content_range};
use crate::sort::resolve_sort;
use crate::traits::ListingResource;

fn count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

/// List one page of `T`.
///
/// Sorting, offset and limit run in the database. The search-box `filter`
/// is applied to the fetched page afterwards, so `results` can be shorter
/// than `limit` and `summary` describes only the rows actually returned.
///
/// # Errors
///
/// 400 for an unknown sort key. A database failure becomes a 500 carrying
/// the zeroed fallback envelope.
pub async fn list<T>(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<(HeaderMap, Json<ListResponse<T>>), ListingError>
where
    T: ListingResource,
{
    let pagination = Pagination::from_params(
        params.page.as_deref(),
        params.limit.as_deref(),
        state.config.max_page_size,
    );
    let (order_column, order_direction) = resolve_sort(
        params.sort.as_deref(),
        params.order.as_deref(),
        &T::sortable_columns(),
        T::DEFAULT_SORT,
        T::DEFAULT_ORDER,
    )?;
    let filter = params
        .filter
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(parse);

    tracing::debug!(
        resource = T::RESOURCE_NAME,
        page = pagination.page,
        limit = pagination.limit,
        filter_terms = filter.as_ref().map_or(0, |f| f.terms().len()),
        "Listing request"
    );

    let (rows, total_items) = tokio::try_join!(
        T::fetch_page(
            &state.db,
            order_column,
            order_direction,
            pagination.offset(),
            pagination.limit,
        ),
        T::total_count(&state.db),
    )
    .map_err(|err| ListingError::unavailable(T::RESOURCE_NAME, err))?;

    let fetched = count(rows.len());
    let results = match &filter {
        Some(filter) => filter.retain_matching(rows, T::candidate),
        None => rows,
    };
    let summary = Summary::from_amounts(results.iter().map(T::amount));

    let mut headers = calculate_content_range(
        pagination.offset(),
        fetched,
        total_items,
        T::RESOURCE_NAME,
    );
    if let Ok(value) =
        HeaderValue::from_str(&format!("public, max-age={}", state.config.cache_max_age))
    {
        headers.insert(CACHE_CONTROL, value);
    }

    Ok((
        headers,
        Json(ListResponse {
            results,
            pagination: pagination.meta(total_items),
            summary,
            error: None,
        }),
    ))
}

/// Top vendors by spending.
#[utoipa::path(
    get,
    path = "/api/vendors",
    params(ListParams),
    responses(
        (status = 200, description = "Page of vendor totals"),
        (status = 400, description = "Unknown sort key"),
        (status = 500, description = "Zeroed envelope, data store unavailable")
    ),
    tag = "listings"
)]
pub async fn list_vendors(
    state: State<AppState>,
    params: Query<ListParams>,
) -> Result<(HeaderMap, Json<ListResponse<vendor_total::Model>>), ListingError> {
    list::<vendor_total::Model>(state, params).await
}

/// Departments with spending and workforce figures.
#[utoipa::path(
    get,
    path = "/api/departments",
    params(ListParams),
    responses(
        (status = 200, description = "Page of departments"),
        (status = 400, description = "Unknown sort key"),
        (status = 500, description = "Zeroed envelope, data store unavailable")
    ),
    tag = "listings"
)]
pub async fn list_departments(
    state: State<AppState>,
    params: Query<ListParams>,
) -> Result<(HeaderMap, Json<ListResponse<department::Model>>), ListingError> {
    list::<department::Model>(state, params).await
}

/// Budget programs.
#[utoipa::path(
    get,
    path = "/api/programs",
    params(ListParams),
    responses(
        (status = 200, description = "Page of programs"),
        (status = 400, description = "Unknown sort key"),
        (status = 500, description = "Zeroed envelope, data store unavailable")
    ),
    tag = "listings"
)]
pub async fn list_programs(
    state: State<AppState>,
    params: Query<ListParams>,
) -> Result<(HeaderMap, Json<ListResponse<program::Model>>), ListingError> {
    list::<program::Model>(state, params).await
}
