//! View Derivations
//!
//! Read-only computations over `DashboardData` for presentation layers:
//! KPI tiles, lot table queries, lot drill-downs, trend ranges and exports. None of them
//! mutate the view-model.

mod export;
mod kpi;
mod lot_detail;
mod lot_table;
mod trend_range;

pub use export::export_lots;
pub use kpi::*;
pub use lot_detail::lot_detail;
pub use lot_table::query_lots;
pub use trend_range::filter_trend;
