//! Dashboard Models
//!
//! The normalized view-model handed to presentation layers. Field names go
//! over the wire in camelCase; dates are `YYYY-MM-DD` strings.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lot id used by insights that apply to every lot
pub const ALL_LOTS: &str = "ALL";

/// Upper bound for every RFT percentage
pub const RFT_CEILING: f64 = 100.0;

/// Lifecycle status of a lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LotStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Complete")]
    Complete,
    #[serde(rename = "On Hold")]
    OnHold,
    #[serde(rename = "At Risk")]
    AtRisk,
}

impl LotStatus {
    /// Every status, in display order
    pub const ALL: [LotStatus; 4] = [
        LotStatus::InProgress,
        LotStatus::Complete,
        LotStatus::OnHold,
        LotStatus::AtRisk,
    ];

    /// Human-readable label, identical to the wire form
    pub fn label(&self) -> &'static str {
        match self {
            LotStatus::InProgress => "In Progress",
            LotStatus::Complete => "Complete",
            LotStatus::OnHold => "On Hold",
            LotStatus::AtRisk => "At Risk",
        }
    }

    /// Parse a label back into a status
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl std::fmt::Display for LotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One finished-goods lot, reduced from all of its raw records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotData {
    /// Canonical lot identifier (e.g. "NAR0042")
    pub id: String,
    /// Display number
    pub number: String,
    /// Product description
    pub product: String,
    /// Customer name
    pub customer: String,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: LotStatus,
    /// Record-level right-first-time rate, 0..=100
    pub rft_rate: f64,
    /// Seven-point synthetic sparkline derived from `rft_rate`
    pub trend: Vec<f64>,
    /// Number of records counted as errors
    pub errors: u32,
    /// Cycle time in days
    pub cycle_time: f64,
    /// Cycle time target in days
    pub cycle_time_target: f64,
    /// Always `errors > 0`
    pub has_errors: bool,
    /// Distinct error-type labels, first-seen order
    pub error_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_batch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
}

impl LotData {
    /// Percentage by which cycle time exceeds target, if a target is set
    pub fn cycle_time_overage_percent(&self) -> Option<f64> {
        if self.cycle_time_target > 0.0 {
            Some((self.cycle_time / self.cycle_time_target - 1.0) * 100.0)
        } else {
            None
        }
    }

    /// Whether the lot passed without a single error record
    pub fn is_right_first_time(&self) -> bool {
        self.errors == 0
    }
}

/// One calendar day of the plant-wide RFT series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RftTrendPoint {
    pub date: NaiveDate,
    pub overall: f64,
    pub internal: f64,
    pub external: f64,
}

/// The three RFT channels and their floors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RftChannel {
    Overall,
    Internal,
    External,
}

impl RftChannel {
    pub const ALL: [RftChannel; 3] = [RftChannel::Overall, RftChannel::Internal, RftChannel::External];

    /// Lowest value the channel may report
    pub fn floor(&self) -> f64 {
        match self {
            RftChannel::Overall => 85.0,
            RftChannel::Internal => 88.0,
            RftChannel::External => 90.0,
        }
    }

    /// Starting value when a series has no observed day yet
    pub fn baseline(&self) -> f64 {
        match self {
            RftChannel::Overall => 95.0,
            RftChannel::Internal => 96.0,
            RftChannel::External => 97.0,
        }
    }

    /// Clamp a raw percentage into the channel's band
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.floor(), RFT_CEILING)
    }
}

impl RftTrendPoint {
    /// Read one channel of the point
    pub fn channel(&self, channel: RftChannel) -> f64 {
        match channel {
            RftChannel::Overall => self.overall,
            RftChannel::Internal => self.internal,
            RftChannel::External => self.external,
        }
    }
}

/// Status of a timeline event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Complete,
    Error,
}

/// A dated milestone or error on a lot's timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub lot: String,
    pub event: String,
    pub date: NaiveDate,
    pub status: EventStatus,
}

/// Insight severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Category of a generated insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsightKind {
    #[serde(rename = "Quality Risk")]
    QualityRisk,
    #[serde(rename = "Cycle Time")]
    CycleTime,
    #[serde(rename = "Error Pattern")]
    ErrorPattern,
    #[serde(rename = "Process Improvement")]
    ProcessImprovement,
}

/// Rule-generated advisory about one lot or all lots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictiveInsight {
    pub id: String,
    /// Lot id, or [`ALL_LOTS`]
    pub lot: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
}

/// Aggregate counters over all lots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub lot_count: usize,
    /// Share of lots with zero errors, 0..=100
    pub rft_rate: f64,
    pub avg_cycle_time: f64,
    pub avg_errors: f64,
    pub in_progress_lots: usize,
    pub completed_lots: usize,
    pub on_hold_lots: usize,
    pub at_risk_lots: usize,
}

impl DashboardSummary {
    /// Count for a single status
    pub fn count_for(&self, status: LotStatus) -> usize {
        match status {
            LotStatus::InProgress => self.in_progress_lots,
            LotStatus::Complete => self.completed_lots,
            LotStatus::OnHold => self.on_hold_lots,
            LotStatus::AtRisk => self.at_risk_lots,
        }
    }
}

/// The aggregate root consumed by presentation layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub lots: BTreeMap<String, LotData>,
    pub rft_trend: Vec<RftTrendPoint>,
    pub timeline_events: Vec<TimelineEvent>,
    pub predictions: Vec<PredictiveInsight>,
    pub summary: DashboardSummary,
}

impl DashboardData {
    /// Look up one lot by id
    pub fn lot(&self, id: &str) -> Option<&LotData> {
        self.lots.get(id)
    }

    /// Latest point of the RFT series
    pub fn latest_trend_point(&self) -> Option<&RftTrendPoint> {
        self.rft_trend.last()
    }
}
