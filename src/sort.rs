use sea_orm::{ColumnTrait, Order};

use crate::errors::ApiError;

/// Convert a public `order` value to `Order`, falling back to `default`.
fn parse_order(order: Option<&str>, default: Order) -> Order {
    match order.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("asc") => Order::Asc,
        Some("desc") => Order::Desc,
        _ => default,
    }
}

/// Find column by public sort key
fn find_column<C: Copy>(key: &str, columns: &[(&str, C)]) -> Option<C> {
    columns
        .iter()
        .find(|&&(name, _)| name == key)
        .map(|&(_, column)| column)
}

/// Map a public sort key to a column through the resource's allow-list.
///
/// A missing key uses `default_key`. Keys are matched exactly after trimming.
///
/// # Errors
///
/// Returns a 400 for a key that is not on the allow-list.
pub fn resolve_sort<C>(
    sort: Option<&str>,
    order: Option<&str>,
    columns: &[(&'static str, C)],
    default_key: &str,
    default_order: Order,
) -> Result<(C, Order), ApiError>
where
    C: ColumnTrait + Copy,
{
    let key = sort.map_or(default_key, str::trim);
    let Some(column) = find_column(key, columns) else {
        let allowed: Vec<&str> = columns.iter().map(|&(name, _)| name).collect();
        return Err(ApiError::bad_request(format!(
            "Invalid sort key. Expected one of: {}",
            allowed.join(", ")
        )));
    };

    Ok((column, parse_order(order, default_order)))
}
