use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Query parameters accepted by every listing endpoint.
///
/// # Pagination
/// `page` is 1-based, `limit` is the page size. Both are read as raw strings:
/// a missing, unparseable or out-of-range value falls back to the default
/// rather than failing the request.
///
/// # Sorting
/// `sort` is a public sort key from the endpoint's allow-list (for example
/// `amount` or `name`); an unknown key is a 400. `order` is `asc` or `desc`.
///
/// # Filtering
/// `filter` is a search-box expression matched against the record's name:
/// - `acme`: name contains "acme" (case-insensitive)
/// - `acme AND services` or `acme, services`: contains both
/// - `caltrans OR transportation`: contains either
/// - `"health services" AND acme`: quoted phrases keep separators literal
#[serde_as]
#[derive(Debug, Deserialize, IntoParams, ToSchema, Default)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Page number, starting at 1.
    #[param(example = "1")]
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page: Option<String>,
    /// Items per page.
    #[param(example = "25")]
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub limit: Option<String>,
    /// Public sort key.
    #[param(example = "amount")]
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub sort: Option<String>,
    /// Sort direction, `asc` or `desc`.
    #[param(example = "desc")]
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub order: Option<String>,
    /// Search-box filter expression.
    #[param(example = "acme AND services")]
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub filter: Option<String>,
}

/// Pagination block of a listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
pub struct PaginationMeta {
    pub page: u64,
    pub limit: u64,
    /// Rows available before the search-box filter is applied.
    pub total_items: u64,
    pub total_pages: u64,
    pub has_more: bool,
}

/// Aggregate figures over the rows returned on this page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, Default)]
pub struct Summary {
    pub record_count: u64,
    pub total_amount: f64,
    pub average_amount: f64,
}

impl Summary {
    /// Sum and average a page of amounts. Empty pages give all zeroes.
    #[must_use]
    pub fn from_amounts(amounts: impl IntoIterator<Item = f64>) -> Self {
        let (count, total) = amounts
            .into_iter()
            .fold((0_u64, 0.0_f64), |(count, total), amount| (count + 1, total + amount));
        #[allow(clippy::cast_precision_loss)]
        let average_amount = if count == 0 { 0.0 } else { total / count as f64 };
        Self {
            record_count: count,
            total_amount: total,
            average_amount,
        }
    }
}

/// Envelope returned by every listing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub results: Vec<T>,
    pub pagination: PaginationMeta,
    pub summary: Summary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ListResponse<T> {
    /// Safe body for a failed listing: no rows, everything zeroed.
    #[must_use]
    pub fn fallback(error: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            pagination: PaginationMeta::default(),
            summary: Summary::default(),
            error: Some(error.into()),
        }
    }
}

/// Query parameters for the keyword search endpoint.
#[serde_as]
#[derive(Debug, Deserialize, IntoParams, ToSchema, Default)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Search-box expression, same grammar as the listing `filter`.
    #[param(example = "transportation OR caltrans")]
    #[serde(default)]
    pub q: Option<String>,
    /// Maximum hits per group.
    #[param(example = "10")]
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DepartmentHit {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProgramHit {
    pub code: String,
    pub name: String,
    pub department: String,
}

/// Grouped keyword search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Default)]
pub struct SearchResponse {
    pub query: String,
    pub total: usize,
    pub vendors: Vec<String>,
    pub departments: Vec<DepartmentHit>,
    pub programs: Vec<ProgramHit>,
}

/// Whistleblower tip form body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TipRequest {
    pub message: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

/// Acknowledgement for a stored tip. The tip text is never echoed back.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TipReceipt {
    pub id: uuid::Uuid,
    pub received_at: chrono::DateTime<chrono::Utc>,
}

/// Mailing-list signup form body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubscribeRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscribeResponse {
    pub id: uuid::Uuid,
    pub email: String,
}
