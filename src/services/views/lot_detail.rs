//! Lot Detail
//!
//! Everything the view-model knows about a single lot.

use crate::models::dashboard::DashboardData;
use crate::models::views::LotDetail;

/// Drill-down for `id`, or `None` when the lot is unknown
pub fn lot_detail(data: &DashboardData, id: &str) -> Option<LotDetail> {
    let lot = data.lot(id)?.clone();
    let timeline_events = data
        .timeline_events
        .iter()
        .filter(|event| event.lot == id)
        .cloned()
        .collect();
    let insights = data
        .predictions
        .iter()
        .filter(|insight| insight.lot == id)
        .cloned()
        .collect();

    Some(LotDetail {
        lot,
        timeline_events,
        insights,
    })
}
