//! KPI Header
//!
//! The six headline tiles shown above the dashboard.

use crate::models::dashboard::{DashboardData, RftChannel, RftTrendPoint};
use crate::models::views::{KpiMetric, KpiStatus, KpiTrend};

/// Trend points shown in an RFT sparkline
pub const KPI_SPARKLINE_POINTS: usize = 10;
/// RFT at or above this is healthy
pub const RFT_SUCCESS_THRESHOLD: f64 = 95.0;
/// RFT at or above this (and below success) needs attention
pub const RFT_WARNING_THRESHOLD: f64 = 90.0;
/// More at-risk lots than this is an error
pub const AT_RISK_ERROR_THRESHOLD: usize = 5;

fn rft_status(value: f64) -> KpiStatus {
    if value >= RFT_SUCCESS_THRESHOLD {
        KpiStatus::Success
    } else if value >= RFT_WARNING_THRESHOLD {
        KpiStatus::Warning
    } else {
        KpiStatus::Error
    }
}

/// Direction and signed delta between the last two points of a channel
fn channel_movement(trend: &[RftTrendPoint], channel: RftChannel) -> (KpiTrend, String) {
    match trend {
        [.., prev, last] => {
            let delta = last.channel(channel) - prev.channel(channel);
            let direction = if delta > 0.0 {
                KpiTrend::Up
            } else if delta < 0.0 {
                KpiTrend::Down
            } else {
                KpiTrend::Neutral
            };
            (direction, format!("{:.1}%", delta))
        }
        _ => (KpiTrend::Neutral, "0%".to_string()),
    }
}

fn sparkline(trend: &[RftTrendPoint], channel: RftChannel) -> Vec<f64> {
    let start = trend.len().saturating_sub(KPI_SPARKLINE_POINTS);
    trend[start..].iter().map(|p| p.channel(channel)).collect()
}

fn channel_metric(
    data: &DashboardData,
    channel: RftChannel,
    id: &str,
    label: &str,
    info: &str,
) -> KpiMetric {
    let latest = data.latest_trend_point().map(|p| p.channel(channel));
    let (trend, trend_value) = channel_movement(&data.rft_trend, channel);
    KpiMetric {
        id: id.to_string(),
        label: label.to_string(),
        value: format!("{:.1}%", latest.unwrap_or(0.0)),
        secondary_value: None,
        sparkline: Some(sparkline(&data.rft_trend, channel)),
        trend,
        trend_value,
        status: rft_status(latest.unwrap_or(0.0)),
        alert: false,
        info: info.to_string(),
    }
}

/// Build the KPI tiles for a view-model.
///
/// `cycle_time_target` is the plant target in days used to colour the
/// average cycle time tile.
pub fn kpi_metrics(data: &DashboardData, cycle_time_target: f64) -> Vec<KpiMetric> {
    let summary = &data.summary;
    let (overall_trend, overall_delta) = channel_movement(&data.rft_trend, RftChannel::Overall);

    let active = summary.in_progress_lots as f64;
    let avg_cycle = summary.avg_cycle_time;
    let at_risk = summary.at_risk_lots;

    vec![
        KpiMetric {
            id: "overall-rft".to_string(),
            label: "Overall RFT Rate".to_string(),
            value: format!("{:.1}%", summary.rft_rate),
            secondary_value: Some(format!("{} lots analyzed", summary.lot_count)),
            sparkline: Some(sparkline(&data.rft_trend, RftChannel::Overall)),
            trend: overall_trend,
            trend_value: overall_delta,
            status: rft_status(summary.rft_rate),
            alert: false,
            info: "Overall Right First Time rate across all lots in the last 30 days".to_string(),
        },
        channel_metric(
            data,
            RftChannel::Internal,
            "internal-rft",
            "Internal RFT",
            "Internal Right First Time rate during documentation and production",
        ),
        channel_metric(
            data,
            RftChannel::External,
            "external-rft",
            "External RFT",
            "External Right First Time rate reported by customers",
        ),
        KpiMetric {
            id: "active-lots".to_string(),
            label: "Active Lots".to_string(),
            value: summary.in_progress_lots.to_string(),
            secondary_value: None,
            sparkline: Some(vec![active + 5.0, active + 3.0, active + 2.0, active + 1.0, active]),
            trend: KpiTrend::Neutral,
            trend_value: "0".to_string(),
            status: KpiStatus::Neutral,
            alert: false,
            info: "Currently active manufacturing lots in the system".to_string(),
        },
        KpiMetric {
            id: "cycle-time".to_string(),
            label: "Avg Cycle Time".to_string(),
            value: format!("{:.1}", avg_cycle),
            secondary_value: Some("days".to_string()),
            sparkline: Some(vec![
                avg_cycle + 2.0,
                avg_cycle + 1.5,
                avg_cycle + 1.0,
                avg_cycle + 0.5,
                avg_cycle,
            ]),
            trend: KpiTrend::Down,
            trend_value: "-0.5 days".to_string(),
            status: if avg_cycle <= cycle_time_target {
                KpiStatus::Success
            } else {
                KpiStatus::Warning
            },
            alert: false,
            info: "Average cycle time for lot completion in the last 30 days".to_string(),
        },
        KpiMetric {
            id: "at-risk-lots".to_string(),
            label: "At-Risk Lots".to_string(),
            value: at_risk.to_string(),
            secondary_value: None,
            sparkline: Some(
                [at_risk.saturating_sub(2), at_risk.saturating_sub(1), at_risk]
                    .iter()
                    .map(|n| *n as f64)
                    .collect(),
            ),
            trend: if at_risk > 0 {
                KpiTrend::Up
            } else {
                KpiTrend::Neutral
            },
            trend_value: if at_risk > 0 {
                format!("+{}", at_risk)
            } else {
                "0".to_string()
            },
            status: if at_risk > AT_RISK_ERROR_THRESHOLD {
                KpiStatus::Error
            } else if at_risk > 0 {
                KpiStatus::Warning
            } else {
                KpiStatus::Success
            },
            alert: at_risk > 0,
            info: "Lots with detected quality or timing issues that need review".to_string(),
        },
    ]
}
