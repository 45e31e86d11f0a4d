//! Dashboard Commands
//!
//! Entry points for presentation layers. Every command returns a
//! `CommandResponse`; failures travel inside it rather than as `Err`.

use std::sync::Arc;

use chrono::Utc;

use crate::models::dashboard::{DashboardData, LotData, RftTrendPoint};
use crate::models::response::{CommandResponse, LoadStatusResponse};
use crate::models::views::{
    ExportRequest, ExportResult, KpiMetric, LotDetail, LotQuery, LotRows, TimeRange,
};
use crate::services::dashboard::{DashboardState, DataSource};
use crate::services::views;
use crate::utils::error::AppError;

/// Run one load from the given source
pub async fn load_dashboard(
    state: &DashboardState,
    source: DataSource,
) -> Result<CommandResponse<LoadStatusResponse>, String> {
    Ok(state.load(&source).await.into())
}

/// The whole current view-model
pub async fn get_dashboard_data(
    state: &DashboardState,
) -> Result<CommandResponse<Arc<DashboardData>>, String> {
    Ok(state.dashboard().await.into())
}

/// Phase, origin and advisory of the most recent load
pub async fn get_load_status(
    state: &DashboardState,
) -> Result<CommandResponse<LoadStatusResponse>, String> {
    Ok(CommandResponse::ok(state.status().await))
}

/// One lot by id
pub async fn get_lot(state: &DashboardState, id: String) -> Result<CommandResponse<LotData>, String> {
    let result = state.dashboard().await.and_then(|data| {
        data.lot(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("lot {}", id)))
    });
    Ok(result.into())
}

/// One lot with its timeline events and insights
pub async fn get_lot_detail(
    state: &DashboardState,
    id: String,
) -> Result<CommandResponse<LotDetail>, String> {
    let result = state.dashboard().await.and_then(|data| {
        views::lot_detail(&data, &id).ok_or_else(|| AppError::not_found(format!("lot {}", id)))
    });
    Ok(result.into())
}

/// Lot table rows for a query
pub async fn query_lots(
    state: &DashboardState,
    query: LotQuery,
) -> Result<CommandResponse<LotRows>, String> {
    let result = state
        .dashboard()
        .await
        .map(|data| views::query_lots(&data, &query));
    Ok(result.into())
}

/// KPI header tiles
pub async fn get_kpi_metrics(
    state: &DashboardState,
) -> Result<CommandResponse<Vec<KpiMetric>>, String> {
    let target = state.get_config().await.cycle_time_target_days;
    let result = state
        .dashboard()
        .await
        .map(|data| views::kpi_metrics(&data, target));
    Ok(result.into())
}

/// RFT series limited to a trailing range.
///
/// The range is measured back from the newest point in the series.
pub async fn get_rft_trend(
    state: &DashboardState,
    range: Option<TimeRange>,
) -> Result<CommandResponse<Vec<RftTrendPoint>>, String> {
    let range = range.unwrap_or_default();
    let result = state.dashboard().await.map(|data| match data.latest_trend_point() {
        Some(latest) => views::filter_trend(&data.rft_trend, range, latest.date),
        None => Vec::new(),
    });
    Ok(result.into())
}

/// Export lots as CSV or JSON
pub async fn export_lots(
    state: &DashboardState,
    request: ExportRequest,
) -> Result<CommandResponse<ExportResult>, String> {
    let result = state
        .dashboard()
        .await
        .and_then(|data| views::export_lots(&data, &request, Utc::now()));
    if let Ok(ref export) = result {
        tracing::info!(
            "[Export] {} lots as {}",
            export.lot_count,
            export.suggested_filename
        );
    }
    Ok(result.into())
}
