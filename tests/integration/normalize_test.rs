//! Normalization Pipeline Integration Tests
//!
//! Drives `DashboardAssembler` with raw JSON payloads and checks the
//! properties every assembled view-model must hold.

use chrono::NaiveDate;
use serde_json::{json, Value};

use lot_dashboard::models::dashboard::{LotStatus, RftChannel};
use lot_dashboard::models::settings::PipelineConfig;
use lot_dashboard::services::normalize::{
    calculate_summary, Assembly, DashboardAssembler, DataOrigin, NormalizeContext,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

fn assemble_with_seed(payload: &Value, seed: u64) -> Assembly {
    let assembler = DashboardAssembler::new(&PipelineConfig::default()).unwrap();
    let mut ctx = NormalizeContext::seeded(today(), seed);
    assembler.assemble(payload, &mut ctx)
}

fn assemble(payload: &Value) -> Assembly {
    assemble_with_seed(payload, 7)
}

/// A mixed payload touching every record shape the pipeline understands
fn plant_payload() -> Value {
    json!({"records": [
        {"fg_batch": "NAR0001", "batchId": "Process", "strength": 1,
         "bulk_batch": "BK-11", "bulk_receipt_date": "2025-05-02",
         "assembly_start": "2025-05-10", "release": "2025-06-01", "total_cycle_time_": 18},
        {"fg_batch": "NAR0001", "source": "Internal", "date": "2025-05-12"},
        {"fg_batch": "NAR0002", "batchId": "Process", "strength": 2.4,
         "assembly_start": "2025-06-03", "total_cycle_time_": 30},
        {"fg_batch": "NAR0002", "hasErrors": true, "errorType": "Label Error",
         "source": "External", "date": "2025-06-20"},
        {"fg_batch": "NAR0002", "hasErrors": true, "errorType": "Label Error",
         "source": "Internal", "date": "2025-06-21"},
        {"assembly_wo": "WO-17", "batchId": "On Hold - QA"},
        {"comment": "shift handover", "date": "2025-06-22"},
        {"note": "sample pulled from NAR0005 for retest"}
    ]})
}

// ============================================================================
// Lot identity
// ============================================================================

#[test]
fn test_lot_keys_are_the_resolvable_ids() {
    let assembly = assemble(&plant_payload());
    assert_eq!(assembly.origin, DataOrigin::Records);

    let keys: Vec<&str> = assembly.data.lots.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["NAR0001", "NAR0002", "NAR0005", "NAR0017"]);
}

#[test]
fn test_work_order_records_share_a_lot() {
    let payload = json!([
        {"assembly_wo": "42", "hasErrors": true},
        {"assembly_wo": "42", "batchId": "Process"}
    ]);
    let assembly = assemble(&payload);

    assert_eq!(assembly.data.lots.len(), 1);
    let lot = assembly.data.lots.get("NAR0042").unwrap();
    assert_eq!(lot.errors, 1);
}

// ============================================================================
// Per-lot invariants
// ============================================================================

#[test]
fn test_lot_invariants_hold() {
    let assembly = assemble(&plant_payload());
    for lot in assembly.data.lots.values() {
        assert_eq!(lot.has_errors, lot.errors > 0, "lot {}", lot.id);
        assert!((0.0..=100.0).contains(&lot.rft_rate), "lot {} rft {}", lot.id, lot.rft_rate);
        assert_eq!(lot.cycle_time_target, 21.0);
    }
}

#[test]
fn test_error_record_counted_once() {
    let payload = json!([{"fg_batch": "NAR0099", "hasErrors": true, "errorCount": 2}]);
    let assembly = assemble(&payload);

    let lot = assembly.data.lots.get("NAR0099").unwrap();
    assert_eq!(lot.errors, 1);
    assert_eq!(lot.status, LotStatus::InProgress);
    assert_eq!(lot.rft_rate, 0.0);
    assert!(lot.has_errors);
}

#[test]
fn test_statuses_from_process_record() {
    let assembly = assemble(&plant_payload());
    let lots = &assembly.data.lots;

    assert_eq!(lots["NAR0001"].status, LotStatus::Complete);
    assert_eq!(lots["NAR0017"].status, LotStatus::OnHold);
    assert_eq!(lots["NAR0002"].error_types, vec!["Label Error".to_string()]);
}

// ============================================================================
// Trend and timeline
// ============================================================================

#[test]
fn test_trend_has_thirty_floored_days() {
    let assembly = assemble(&plant_payload());
    let trend = &assembly.data.rft_trend;

    assert_eq!(trend.len(), 30);
    assert_eq!(trend.last().unwrap().date, today());
    for pair in trend.windows(2) {
        assert!(pair[0].date < pair[1].date);
    }
    for point in trend {
        for channel in RftChannel::ALL {
            let value = point.channel(channel);
            assert!(
                value >= channel.floor() && value <= 100.0,
                "{:?} {} on {}",
                channel,
                value,
                point.date
            );
        }
    }
}

#[test]
fn test_timeline_sorted_for_any_record_order() {
    let mut payload = plant_payload();
    let forward = assemble(&payload).data.timeline_events;

    if let Some(records) = payload["records"].as_array_mut() {
        records.reverse();
    }
    let reversed = assemble(&payload).data.timeline_events;

    for events in [&forward, &reversed] {
        assert!(!events.is_empty());
        for pair in events.windows(2) {
            assert!(pair[0].date <= pair[1].date);
        }
    }
    assert_eq!(forward.len(), reversed.len());
}

// ============================================================================
// Fallback
// ============================================================================

#[test]
fn test_empty_records_fall_back() {
    let assembly = assemble(&json!({"records": []}));

    assert!(assembly.is_fallback());
    assert!(!assembly.data.lots.is_empty());
    assert!(assembly.data.summary.lot_count > 0);
    assert!(assembly.advisory.unwrap().starts_with("using backup data"));
}

#[test]
fn test_malformed_payloads_fall_back() {
    for payload in [json!("not records"), json!({"rows": [1, 2]}), json!(null), json!([])] {
        let assembly = assemble(&payload);
        assert!(assembly.is_fallback(), "payload {}", payload);
    }

    let unidentified = assemble(&json!([{"comment": "no lot here"}]));
    assert!(unidentified.is_fallback());
}

#[test]
fn test_invalid_json_text_falls_back() {
    let assembler = DashboardAssembler::new(&PipelineConfig::default()).unwrap();
    let mut ctx = NormalizeContext::seeded(today(), 1);
    let assembly = assembler.assemble_text("{records: [", &mut ctx);
    assert!(assembly.is_fallback());
}

#[test]
fn test_empty_summary_is_all_zero() {
    let summary = calculate_summary(&Default::default());
    assert_eq!(summary.lot_count, 0);
    assert_eq!(summary.rft_rate, 0.0);
    assert_eq!(summary.avg_cycle_time, 0.0);
    assert_eq!(summary.avg_errors, 0.0);
    assert_eq!(summary.in_progress_lots + summary.completed_lots, 0);
    assert_eq!(summary.on_hold_lots + summary.at_risk_lots, 0);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_assembly_is_idempotent_apart_from_jitter() {
    let payload = plant_payload();
    let first = assemble_with_seed(&payload, 1);
    let second = assemble_with_seed(&payload, 99);

    assert_eq!(first.data.summary.lot_count, second.data.summary.lot_count);
    assert_eq!(first.data.summary.at_risk_lots, second.data.summary.at_risk_lots);
    assert_eq!(first.data.summary.completed_lots, second.data.summary.completed_lots);
    assert_eq!(first.data.summary.on_hold_lots, second.data.summary.on_hold_lots);
    assert_eq!(first.data.summary.in_progress_lots, second.data.summary.in_progress_lots);
    for (id, lot) in &first.data.lots {
        let other = &second.data.lots[id];
        assert_eq!(lot.status, other.status);
        assert_eq!(lot.errors, other.errors);
    }
}

#[test]
fn test_same_seed_reproduces_everything() {
    let payload = plant_payload();
    assert_eq!(assemble_with_seed(&payload, 5), assemble_with_seed(&payload, 5));
}
