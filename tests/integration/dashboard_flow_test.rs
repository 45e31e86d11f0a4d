//! Dashboard Flow Integration Tests
//!
//! Loads payloads from files through the command layer and checks the
//! load state machine, the read commands and settings persistence.

use std::path::Path;

use lot_dashboard::models::dashboard::{InsightKind, LotStatus};
use lot_dashboard::models::views::{ExportFormat, ExportRequest, LotQuery, TimeRange};
use lot_dashboard::services::normalize::DataOrigin;
use lot_dashboard::{
    export_lots, get_dashboard_data, get_kpi_metrics, get_load_status, get_lot, get_lot_detail,
    get_rft_trend, get_settings, load_dashboard, query_lots, update_settings, DashboardState,
    DataSource, LoadPhase, SettingsUpdate,
};

const PAYLOAD: &str = r#"{"records": [
    {"fg_batch": "NAR0101", "batchId": "Process", "strength": 1,
     "bulk_receipt_date": "2025-05-01", "release": "2025-05-25", "total_cycle_time_": 19},
    {"fg_batch": "NAR0102", "batchId": "Process", "strength": 2.4, "total_cycle_time_": 28},
    {"fg_batch": "NAR0102", "hasErrors": true, "errorType": "Assembly Error", "source": "Internal"},
    {"cartoning_wo": "103", "batchId": "On Hold"}
]}"#;

fn write_payload(dir: &Path, name: &str, contents: &str) -> DataSource {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    DataSource::File(path)
}

fn state_in(dir: &Path) -> DashboardState {
    DashboardState::with_config_file(Some(dir.join("config.json"))).unwrap()
}

// ============================================================================
// Load state machine
// ============================================================================

#[tokio::test]
async fn test_load_from_file_reaches_ready() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(dir.path());
    let source = write_payload(dir.path(), "lots.json", PAYLOAD);

    let idle = get_load_status(&state).await.unwrap().data.unwrap();
    assert_eq!(idle.phase, LoadPhase::Idle);
    assert!(idle.origin.is_none());

    let status = load_dashboard(&state, source).await.unwrap().data.unwrap();
    assert_eq!(status.phase, LoadPhase::Ready);
    assert_eq!(status.origin, Some(DataOrigin::Records));
    assert_eq!(status.lot_count, 3);
    assert!(status.loaded_at.is_some());

    let data = get_dashboard_data(&state).await.unwrap().data.unwrap();
    assert_eq!(data.summary.lot_count, 3);
    assert_eq!(data.lots["NAR0101"].status, LotStatus::Complete);
    assert_eq!(data.lots["NAR0103"].status, LotStatus::OnHold);
    assert_eq!(data.rft_trend.len(), 30);
}

#[tokio::test]
async fn test_missing_file_loads_backup_data() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(dir.path());

    let status = load_dashboard(&state, DataSource::File(dir.path().join("absent.json")))
        .await
        .unwrap()
        .data
        .unwrap();

    assert_eq!(status.phase, LoadPhase::Failed);
    assert_eq!(status.origin, Some(DataOrigin::Fallback));
    assert!(status.advisory.unwrap().starts_with("using backup data"));

    let data = get_dashboard_data(&state).await.unwrap().data.unwrap();
    assert!(data.summary.lot_count > 0);
}

#[tokio::test]
async fn test_garbage_payload_loads_backup_data() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(dir.path());
    let source = write_payload(dir.path(), "broken.json", "lot,status\nNAR0001,ok\n");

    let status = load_dashboard(&state, source).await.unwrap().data.unwrap();
    assert_eq!(status.phase, LoadPhase::Failed);
    assert!(status.advisory.unwrap().contains("not valid JSON"));
}

// ============================================================================
// Read commands
// ============================================================================

#[tokio::test]
async fn test_read_commands_over_loaded_data() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(dir.path());
    load_dashboard(&state, write_payload(dir.path(), "lots.json", PAYLOAD))
        .await
        .unwrap();

    let lot = get_lot(&state, "NAR0102".to_string()).await.unwrap().data.unwrap();
    assert_eq!(lot.errors, 1);
    assert!(lot.has_errors);
    assert_eq!(lot.product, "WEGOVY 2.4MG 4 PREF PENS");

    let detail = get_lot_detail(&state, "NAR0101".to_string()).await.unwrap().data.unwrap();
    let events: Vec<_> = detail.timeline_events.iter().map(|e| e.event.as_str()).collect();
    assert_eq!(events, vec!["Bulk Receipt", "Release"]);
    assert!(detail.insights.is_empty());

    let rows = query_lots(&state, LotQuery::default().with_status(LotStatus::OnHold))
        .await
        .unwrap()
        .data
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "NAR0103");

    let kpis = get_kpi_metrics(&state).await.unwrap().data.unwrap();
    assert_eq!(kpis.len(), 6);

    let week = get_rft_trend(&state, Some(TimeRange::Week)).await.unwrap().data.unwrap();
    assert_eq!(week.len(), 8);

    let export = export_lots(
        &state,
        ExportRequest {
            query: LotQuery::default(),
            format: ExportFormat::Json,
            include_summary: true,
        },
    )
    .await
    .unwrap()
    .data
    .unwrap();
    assert_eq!(export.lot_count, 3);
    let value: serde_json::Value = serde_json::from_str(&export.data).unwrap();
    assert_eq!(value["summary"]["lotCount"], 3);
}

// ============================================================================
// Settings
// ============================================================================

#[tokio::test]
async fn test_settings_apply_on_next_load_and_persist() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(dir.path());
    let source = write_payload(dir.path(), "lots.json", PAYLOAD);

    load_dashboard(&state, source.clone()).await.unwrap();
    let before = get_dashboard_data(&state).await.unwrap().data.unwrap();
    assert!(!before
        .predictions
        .iter()
        .any(|p| p.kind == InsightKind::ProcessImprovement));

    let updated = update_settings(
        &state,
        SettingsUpdate {
            emit_process_improvement: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(updated.success);

    load_dashboard(&state, source).await.unwrap();
    let after = get_dashboard_data(&state).await.unwrap().data.unwrap();
    assert!(after
        .predictions
        .iter()
        .any(|p| p.kind == InsightKind::ProcessImprovement));

    let reopened = state_in(dir.path());
    let settings = get_settings(&reopened).await.unwrap().data.unwrap();
    assert!(settings.emit_process_improvement);
}
