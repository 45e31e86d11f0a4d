//! Lot Table
//!
//! Search, status filter and sort over the lot map.

use std::cmp::Ordering;

use crate::models::dashboard::{DashboardData, LotData};
use crate::models::views::{LotQuery, LotRows, LotSortField, SortDirection};

/// Lots matching the query, in table order
pub fn query_lots(data: &DashboardData, query: &LotQuery) -> LotRows {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut rows: LotRows = data
        .lots
        .values()
        .filter(|lot| query.status.map_or(true, |status| lot.status == status))
        .filter(|lot| needle.as_deref().map_or(true, |n| matches_search(lot, n)))
        .cloned()
        .collect();

    rows.sort_by(|a, b| {
        let ordering = compare(a, b, query.sort_field);
        match query.sort_direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    rows
}

fn matches_search(lot: &LotData, needle: &str) -> bool {
    [&lot.number, &lot.product, &lot.customer]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

fn compare(a: &LotData, b: &LotData, field: LotSortField) -> Ordering {
    match field {
        LotSortField::Number => a.number.cmp(&b.number),
        LotSortField::Product => a.product.cmp(&b.product),
        LotSortField::StartDate => a.start_date.cmp(&b.start_date),
        LotSortField::DueDate => a.due_date.cmp(&b.due_date),
        LotSortField::Status => a.status.label().cmp(b.status.label()),
        LotSortField::RftRate => a.rft_rate.total_cmp(&b.rft_rate),
        LotSortField::Errors => a.errors.cmp(&b.errors),
        LotSortField::CycleTime => a.cycle_time.total_cmp(&b.cycle_time),
    }
}
