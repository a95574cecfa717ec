use hyper::{HeaderMap, header::CONTENT_RANGE};

use crate::models::PaginationMeta;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 25;

/// Validated page/limit pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

/// Database drivers bind `OFFSET` as a signed 64-bit integer.
const MAX_OFFSET: u64 = i64::MAX.unsigned_abs();

/// Parse a positive integer, treating anything else as absent.
pub(crate) fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value >= 1)
}

impl Pagination {
    /// Clamp raw query values: `page >= 1`, `1 <= limit <= max_limit`.
    ///
    /// Missing, unparseable, zero or negative values take the defaults; a
    /// limit above `max_limit` is clamped down to it.
    #[must_use]
    pub fn from_params(page: Option<&str>, limit: Option<&str>, max_limit: u64) -> Self {
        let max_limit = max_limit.max(1);
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit)
                .unwrap_or(DEFAULT_LIMIT)
                .min(max_limit),
        }
    }

    /// Row offset of this page, capped at the largest offset SQL accepts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        let offset = self.page.saturating_sub(1).saturating_mul(self.limit);
        if offset > MAX_OFFSET { MAX_OFFSET } else { offset }
    }

    #[must_use]
    pub fn meta(&self, total_items: u64) -> PaginationMeta {
        let total_pages = total_items.div_ceil(self.limit.max(1));
        PaginationMeta {
            page: self.page,
            limit: self.limit,
            total_items,
            total_pages,
            has_more: self.page < total_pages,
        }
    }
}

/// Sanitize resource name by removing control characters for HTTP headers
fn sanitize_resource_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect()
}

/// Build a `Content-Range` header such as `vendors 0-24/1234`.
///
/// `returned` is the size of the database window that was fetched, before any
/// search-box filtering. An empty window is reported as `vendors */1234`.
#[must_use]
pub fn calculate_content_range(
    offset: u64,
    returned: u64,
    total_count: u64,
    resource_name: &str,
) -> HeaderMap {
    let safe_name = sanitize_resource_name(resource_name);
    let content_range = if returned == 0 {
        format!("{safe_name} */{total_count}")
    } else {
        let last = offset.saturating_add(returned - 1);
        format!("{safe_name} {offset}-{last}/{total_count}")
    };

    let mut headers = HeaderMap::new();
    if let Ok(value) = content_range.parse() {
        headers.insert(CONTENT_RANGE, value);
    }
    headers
}
