//! Lot Summarizer
//!
//! Reduces the record group of one lot to a [`LotData`]. Each attribute is
//! computed on its own and falls back to a documented default, so a lot
//! with sparse or odd records still yields a complete entity.

use chrono::{Days, NaiveDate};
use lot_dashboard_core::{CoreError, CoreResult, RawRecord};

use super::context::NormalizeContext;
use super::fields::{
    self, display_number, is_error_record, label_contains, BULK_BATCH, BULK_RECEIPT_DATE,
    CYCLE_TIME_FIELDS, INTERNAL_RFT_LABEL, ON_HOLD_LABEL, PROCESS_LABEL, RELEASE, STRENGTH,
};
use crate::models::dashboard::{LotData, LotStatus, RFT_CEILING};
use crate::models::settings::PipelineConfig;

/// Points in a lot's sparkline
pub const LOT_TREND_POINTS: usize = 7;
/// Rise per sparkline point
const LOT_TREND_RAMP: f64 = 0.5;
/// Total width of the sparkline noise band
const LOT_TREND_NOISE: f64 = 4.0;
/// Lowest sparkline value
const LOT_TREND_FLOOR: f64 = 80.0;

/// Product name when no strength is known
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Product name for a pen strength in mg
pub fn product_name(strength: f64) -> String {
    format!("WEGOVY {}MG 4 PREF PENS", display_number(strength))
}

/// Turns one lot's records into a [`LotData`]
#[derive(Debug, Clone)]
pub struct LotSummarizer {
    customer: String,
    cycle_time_target: f64,
    cycle_time_fallback: Option<f64>,
    count_internal_rft_label: bool,
    at_risk_threshold: u32,
    due_horizon_days: u64,
}

impl LotSummarizer {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            customer: config.customer.clone(),
            cycle_time_target: config.cycle_time_target_days,
            cycle_time_fallback: config.cycle_time_fallback_days,
            count_internal_rft_label: config.count_internal_rft_label,
            at_risk_threshold: config.at_risk_error_threshold,
            due_horizon_days: u64::from(config.due_date_horizon_days),
        }
    }

    /// Summarize one lot. Fails only for an empty id or an empty group.
    pub fn summarize(
        &self,
        id: &str,
        records: &[&RawRecord],
        ctx: &mut NormalizeContext,
    ) -> CoreResult<LotData> {
        if id.trim().is_empty() {
            return Err(CoreError::validation("lot id is empty"));
        }
        if records.is_empty() {
            return Err(CoreError::validation(format!("lot {} has no records", id)));
        }

        let process = records.iter().copied().find(|r| label_contains(r, PROCESS_LABEL));

        let errors = self.error_count(records);
        let rft_rate = record_rft_rate(records);
        let status = self.status(process, records, errors);
        let cycle_time = self.cycle_time(process, records);
        let strength = prefer_process(process, records, |r| r.number(STRENGTH));
        let bulk_batch = prefer_process(process, records, |r| r.text(BULK_BATCH));

        let start_date =
            prefer_process(process, records, |r| r.date(BULK_RECEIPT_DATE)).unwrap_or(ctx.today);
        let due_date = process
            .and_then(|p| p.date(RELEASE))
            .unwrap_or_else(|| self.default_due_date(ctx.today));

        let trend = lot_trend(rft_rate, ctx);

        Ok(LotData {
            id: id.to_string(),
            number: id.to_string(),
            product: strength
                .map(product_name)
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
            customer: self.customer.clone(),
            start_date,
            due_date,
            status,
            rft_rate,
            trend,
            errors,
            cycle_time,
            cycle_time_target: self.cycle_time_target,
            has_errors: errors > 0,
            error_types: self.error_types(records),
            bulk_batch,
            strength,
        })
    }

    // ========================================================================
    // Errors
    // ========================================================================

    fn counts_as_error(&self, record: &RawRecord) -> bool {
        is_error_record(record)
            || (self.count_internal_rft_label && label_contains(record, INTERNAL_RFT_LABEL))
    }

    /// Records counted as errors; a record meeting several conditions counts once
    fn error_count(&self, records: &[&RawRecord]) -> u32 {
        let count = records.iter().filter(|r| self.counts_as_error(r)).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    fn error_types(&self, records: &[&RawRecord]) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();
        for record in records.iter().filter(|r| self.counts_as_error(r)) {
            if let Some(kind) = fields::error_type(record) {
                if !types.contains(&kind) {
                    types.push(kind);
                }
            }
        }
        types
    }

    // ========================================================================
    // Status and timing
    // ========================================================================

    fn status(&self, process: Option<&RawRecord>, records: &[&RawRecord], errors: u32) -> LotStatus {
        if process.and_then(|p| p.date(RELEASE)).is_some() {
            LotStatus::Complete
        } else if errors > self.at_risk_threshold {
            LotStatus::AtRisk
        } else if records.iter().any(|r| label_contains(r, ON_HOLD_LABEL)) {
            LotStatus::OnHold
        } else {
            LotStatus::InProgress
        }
    }

    fn cycle_time(&self, process: Option<&RawRecord>, records: &[&RawRecord]) -> f64 {
        let measured = process
            .and_then(|p| p.first_number(CYCLE_TIME_FIELDS))
            .or_else(|| records.iter().find_map(|r| r.number("cycleTime")))
            .filter(|days| *days > 0.0);
        measured.or(self.cycle_time_fallback).unwrap_or(0.0)
    }

    fn default_due_date(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(self.due_horizon_days))
            .unwrap_or(today)
    }
}

/// Share of records without an error flag; the label rule is not applied here
fn record_rft_rate(records: &[&RawRecord]) -> f64 {
    if records.is_empty() {
        return RFT_CEILING;
    }
    let total = records.len() as f64;
    let failed = records.iter().filter(|r| is_error_record(r)).count() as f64;
    ((total - failed) / total * 100.0).clamp(0.0, RFT_CEILING)
}

/// Seven-point display sparkline ramping up to the lot's RFT rate
fn lot_trend(rft_rate: f64, ctx: &mut NormalizeContext) -> Vec<f64> {
    let last = (LOT_TREND_POINTS - 1) as f64;
    (0..LOT_TREND_POINTS)
        .map(|i| {
            let ramp = (i as f64 - last) * LOT_TREND_RAMP;
            let noise = (ctx.jitter().next_unit() - 0.5) * LOT_TREND_NOISE;
            (rft_rate + ramp + noise).clamp(LOT_TREND_FLOOR, RFT_CEILING)
        })
        .collect()
}

/// Read from the process record first, then from any record in the group
fn prefer_process<T>(
    process: Option<&RawRecord>,
    records: &[&RawRecord],
    read: impl Fn(&RawRecord) -> Option<T>,
) -> Option<T> {
    process
        .and_then(&read)
        .or_else(|| records.iter().find_map(|r| read(*r)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lot_dashboard_core::SequenceJitter;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn ctx() -> NormalizeContext {
        NormalizeContext::without_jitter(today())
    }

    fn records(value: serde_json::Value) -> Vec<RawRecord> {
        serde_json::from_value(value).unwrap()
    }

    fn summarize_with(config: &PipelineConfig, value: serde_json::Value) -> LotData {
        let owned = records(value);
        let refs: Vec<&RawRecord> = owned.iter().collect();
        LotSummarizer::new(config)
            .summarize("NAR0001", &refs, &mut ctx())
            .unwrap()
    }

    fn summarize(value: serde_json::Value) -> LotData {
        summarize_with(&PipelineConfig::default(), value)
    }

    #[test]
    fn test_single_error_record() {
        let lot = summarize(json!([{"fg_batch": "NAR0001", "hasErrors": true, "errorCount": 2}]));
        assert_eq!(lot.errors, 1);
        assert!(lot.has_errors);
        assert_eq!(lot.status, LotStatus::InProgress);
        assert_eq!(lot.rft_rate, 0.0);
    }

    #[test]
    fn test_rft_rate_ignores_label_rule() {
        let lot = summarize(json!([
            {"batchId": "Internal RFT check"},
            {"hasErrors": true},
            {},
            {}
        ]));
        assert_eq!(lot.errors, 2);
        assert_eq!(lot.rft_rate, 75.0);
    }

    #[test]
    fn test_label_rule_can_be_disabled() {
        let config = PipelineConfig {
            count_internal_rft_label: false,
            ..Default::default()
        };
        let lot = summarize_with(&config, json!([{"batchId": "Internal RFT"}]));
        assert_eq!(lot.errors, 0);
        assert!(!lot.has_errors);
    }

    #[test]
    fn test_record_with_both_conditions_counts_once() {
        let lot = summarize(json!([{"batchId": "Internal RFT", "hasErrors": true}]));
        assert_eq!(lot.errors, 1);
    }

    #[test]
    fn test_complete_from_process_release() {
        let lot = summarize(json!([
            {"batchId": "Process", "release": "2025-05-20", "total_cycle_time_": 18,
             "strength": 1.7, "bulk_batch": "NAT1001", "bulk_receipt_date": "2025-05-01"},
            {"hasErrors": true}, {"hasErrors": true}, {"hasErrors": true},
            {"hasErrors": true}, {"hasErrors": true}, {"hasErrors": true}
        ]));
        assert_eq!(lot.status, LotStatus::Complete);
        assert_eq!(lot.cycle_time, 18.0);
        assert_eq!(lot.product, "WEGOVY 1.7MG 4 PREF PENS");
        assert_eq!(lot.bulk_batch.as_deref(), Some("NAT1001"));
        assert_eq!(lot.start_date, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
        assert_eq!(lot.due_date, NaiveDate::from_ymd_opt(2025, 5, 20).unwrap());
    }

    #[test]
    fn test_at_risk_above_threshold() {
        let lot = summarize(json!([
            {"hasErrors": true}, {"hasErrors": true}, {"hasErrors": true},
            {"hasErrors": true}, {"hasErrors": true}, {"hasErrors": true},
            {"batchId": "On Hold"}
        ]));
        assert_eq!(lot.errors, 6);
        assert_eq!(lot.status, LotStatus::AtRisk);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let lot = summarize(json!([
            {"hasErrors": true}, {"hasErrors": true}, {"hasErrors": true},
            {"hasErrors": true}, {"hasErrors": true},
            {"stage": "On Hold - deviation"}
        ]));
        assert_eq!(lot.errors, 5);
        assert_eq!(lot.status, LotStatus::OnHold);
    }

    #[test]
    fn test_release_on_non_process_record_is_not_complete() {
        let lot = summarize(json!([{"release": "2025-05-20"}]));
        assert_eq!(lot.status, LotStatus::InProgress);
        assert_eq!(lot.due_date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
    }

    #[test]
    fn test_defaults_for_sparse_lot() {
        let lot = summarize(json!([{"fg_batch": "NAR0001"}]));
        assert_eq!(lot.product, UNKNOWN_PRODUCT);
        assert_eq!(lot.customer, "NOVO NORDISK");
        assert_eq!(lot.start_date, today());
        assert_eq!(lot.due_date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        assert_eq!(lot.cycle_time, 0.0);
        assert_eq!(lot.cycle_time_target, 21.0);
        assert_eq!(lot.rft_rate, 100.0);
        assert!(lot.error_types.is_empty());
    }

    #[test]
    fn test_cycle_time_field_variants() {
        let lot = summarize(json!([{"batchId": "Process", "total_cycle_time_(days)": "24"}]));
        assert_eq!(lot.cycle_time, 24.0);
        let lot = summarize(json!([{"batchId": "Process", "totalCycleTimeDays": 12.5}]));
        assert_eq!(lot.cycle_time, 12.5);
        let lot = summarize(json!([{"cycleTime": 9}]));
        assert_eq!(lot.cycle_time, 9.0);
    }

    #[test]
    fn test_cycle_time_fallback() {
        let config = PipelineConfig {
            cycle_time_fallback_days: Some(21.0),
            ..Default::default()
        };
        let lot = summarize_with(&config, json!([{"batchId": "Process", "total_cycle_time_": 0}]));
        assert_eq!(lot.cycle_time, 21.0);
    }

    #[test]
    fn test_error_types_distinct_first_seen() {
        let lot = summarize(json!([
            {"hasErrors": true, "errorType": "Label Error"},
            {"hasErrors": true, "error_type": "Assembly Error"},
            {"hasErrors": true, "errorType": "Label Error"},
            {"errorType": "Not counted"}
        ]));
        assert_eq!(lot.error_types, vec!["Label Error", "Assembly Error"]);
    }

    #[test]
    fn test_whole_strength_prints_without_decimal() {
        let lot = summarize(json!([{"strength": "1.0"}]));
        assert_eq!(lot.product, "WEGOVY 1MG 4 PREF PENS");
        assert_eq!(lot.strength, Some(1.0));
    }

    #[test]
    fn test_trend_without_jitter_is_a_ramp() {
        let lot = summarize(json!([{}, {}, {"hasErrors": true}, {}]));
        assert_eq!(lot.rft_rate, 75.0);
        // display filler: ramp below the rate, clamped at 80
        assert_eq!(lot.trend, vec![80.0; LOT_TREND_POINTS]);

        let lot = summarize(json!([{}]));
        assert_eq!(lot.trend, vec![97.0, 97.5, 98.0, 98.5, 99.0, 99.5, 100.0]);
    }

    #[test]
    fn test_trend_stays_in_band_with_jitter() {
        let owned = records(json!([{}]));
        let refs: Vec<&RawRecord> = owned.iter().collect();
        let mut ctx = NormalizeContext::new(today(), Box::new(SequenceJitter::new(vec![0.0, 1.0])));
        let lot = LotSummarizer::new(&PipelineConfig::default())
            .summarize("NAR0001", &refs, &mut ctx)
            .unwrap();
        assert_eq!(lot.trend.len(), LOT_TREND_POINTS);
        assert!(lot.trend.iter().all(|v| (80.0..=100.0).contains(v)));
    }

    #[test]
    fn test_precondition_errors() {
        let summarizer = LotSummarizer::new(&PipelineConfig::default());
        assert!(summarizer.summarize("NAR0001", &[], &mut ctx()).is_err());
        let owned = records(json!([{}]));
        let refs: Vec<&RawRecord> = owned.iter().collect();
        assert!(summarizer.summarize(" ", &refs, &mut ctx()).is_err());
    }
}
