//! Backup Data Set
//!
//! A small, fixed sample shown whenever a load yields no lots. Values and
//! dates are constants so the failure view looks the same on every run.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::insights::InsightGenerator;
use super::summary::calculate_summary;
use crate::models::dashboard::{
    DashboardData, EventStatus, LotData, LotStatus, RftTrendPoint, TimelineEvent,
};

const CUSTOMER: &str = "NOVO NORDISK";
const CYCLE_TIME_TARGET: f64 = 21.0;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

struct SampleLot {
    id: &'static str,
    strength: f64,
    status: LotStatus,
    rft_rate: f64,
    trend: [f64; 7],
    errors: u32,
    error_types: &'static [&'static str],
    cycle_time: f64,
    start: (u32, u32),
    due: (u32, u32),
    bulk_batch: &'static str,
}

const SAMPLE_LOTS: &[SampleLot] = &[
    SampleLot {
        id: "NAR0001",
        strength: 0.25,
        status: LotStatus::InProgress,
        rft_rate: 100.0,
        trend: [96.0, 96.8, 97.1, 98.0, 98.4, 99.2, 100.0],
        errors: 0,
        error_types: &[],
        cycle_time: 14.0,
        start: (5, 6),
        due: (6, 5),
        bulk_batch: "NAT1001",
    },
    SampleLot {
        id: "NAR0002",
        strength: 1.7,
        status: LotStatus::Complete,
        rft_rate: 92.3,
        trend: [88.9, 89.7, 90.2, 90.8, 91.5, 91.9, 92.3],
        errors: 1,
        error_types: &["Label Error"],
        cycle_time: 19.0,
        start: (4, 22),
        due: (5, 13),
        bulk_batch: "NAT1002",
    },
    SampleLot {
        id: "NAR0003",
        strength: 1.0,
        status: LotStatus::OnHold,
        rft_rate: 88.0,
        trend: [84.6, 85.3, 86.0, 86.2, 87.1, 87.5, 88.0],
        errors: 2,
        error_types: &["Documentation Error"],
        cycle_time: 27.0,
        start: (4, 29),
        due: (5, 29),
        bulk_batch: "NAT1003",
    },
    SampleLot {
        id: "NAR0004",
        strength: 2.4,
        status: LotStatus::AtRisk,
        rft_rate: 78.6,
        trend: [80.0, 80.0, 80.0, 80.0, 80.0, 80.0, 80.0],
        errors: 6,
        error_types: &["Assembly Error", "Cartoning Error"],
        cycle_time: 23.0,
        start: (5, 1),
        due: (5, 31),
        bulk_batch: "NAT1004",
    },
];

/// (day of May 2024, overall, internal, external)
const SAMPLE_TREND: &[(u32, f64, f64, f64)] = &[
    (6, 91.2, 93.0, 95.1),
    (7, 90.4, 92.6, 94.8),
    (8, 92.1, 93.9, 95.7),
    (9, 93.0, 94.2, 96.0),
    (10, 92.5, 94.8, 96.3),
    (11, 93.8, 95.1, 96.9),
    (12, 94.6, 95.7, 97.2),
    (13, 93.9, 96.0, 97.8),
    (14, 95.2, 96.4, 98.1),
    (15, 95.8, 97.0, 98.5),
];

/// (lot, event, month, day, status), already in date order
const SAMPLE_EVENTS: &[(&str, &str, u32, u32, EventStatus)] = &[
    ("NAR0002", "Bulk Receipt", 4, 22, EventStatus::Complete),
    ("NAR0002", "Assembly Start", 4, 25, EventStatus::Complete),
    ("NAR0003", "Bulk Receipt", 4, 29, EventStatus::Complete),
    ("NAR0002", "Assembly Finish", 4, 30, EventStatus::Complete),
    ("NAR0004", "Bulk Receipt", 5, 1, EventStatus::Complete),
    ("NAR0003", "Assembly Start", 5, 2, EventStatus::Complete),
    ("NAR0002", "Packaging Start", 5, 3, EventStatus::Complete),
    ("NAR0004", "Assembly Start", 5, 4, EventStatus::Complete),
    ("NAR0001", "Bulk Receipt", 5, 6, EventStatus::Complete),
    ("NAR0003", "Error Reported", 5, 7, EventStatus::Error),
    ("NAR0002", "Packaging Finish", 5, 8, EventStatus::Complete),
    ("NAR0004", "Error Reported", 5, 9, EventStatus::Error),
    ("NAR0001", "Assembly Start", 5, 10, EventStatus::Complete),
    ("NAR0002", "Release", 5, 13, EventStatus::Complete),
    ("NAR0004", "Error Reported", 5, 14, EventStatus::Error),
];

fn sample_lot(sample: &SampleLot) -> LotData {
    LotData {
        id: sample.id.to_string(),
        number: sample.id.to_string(),
        product: super::summarizer::product_name(sample.strength),
        customer: CUSTOMER.to_string(),
        start_date: date(2024, sample.start.0, sample.start.1),
        due_date: date(2024, sample.due.0, sample.due.1),
        status: sample.status,
        rft_rate: sample.rft_rate,
        trend: sample.trend.to_vec(),
        errors: sample.errors,
        cycle_time: sample.cycle_time,
        cycle_time_target: CYCLE_TIME_TARGET,
        has_errors: sample.errors > 0,
        error_types: sample.error_types.iter().map(|s| s.to_string()).collect(),
        bulk_batch: Some(sample.bulk_batch.to_string()),
        strength: Some(sample.strength),
    }
}

/// The backup view-model. Insights and summary are derived from the sample
/// lots so they always agree with them.
pub fn fallback_dashboard(insights: &InsightGenerator) -> DashboardData {
    let lots: BTreeMap<String, LotData> = SAMPLE_LOTS
        .iter()
        .map(|s| (s.id.to_string(), sample_lot(s)))
        .collect();

    let rft_trend = SAMPLE_TREND
        .iter()
        .map(|&(day, overall, internal, external)| RftTrendPoint {
            date: date(2024, 5, day),
            overall,
            internal,
            external,
        })
        .collect();

    let timeline_events = SAMPLE_EVENTS
        .iter()
        .map(|&(lot, event, month, day, status)| TimelineEvent {
            lot: lot.to_string(),
            event: event.to_string(),
            date: date(2024, month, day),
            status,
        })
        .collect();

    let predictions = insights.generate(&lots);
    let summary = calculate_summary(&lots);

    DashboardData {
        lots,
        rft_trend,
        timeline_events,
        predictions,
        summary,
    }
}
