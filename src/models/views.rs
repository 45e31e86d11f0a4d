//! View Models
//!
//! Request and result types for the read-only views computed over
//! `DashboardData`: KPI header, lot table queries, trend ranges and exports.

use serde::{Deserialize, Serialize};

use super::dashboard::{DashboardSummary, LotData, LotStatus, PredictiveInsight, TimelineEvent};

/// Direction of a KPI relative to its previous value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiTrend {
    Up,
    Down,
    Neutral,
}

/// Traffic-light status of a KPI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiStatus {
    Success,
    Warning,
    Error,
    Neutral,
}

/// One tile of the KPI header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiMetric {
    pub id: String,
    pub label: String,
    /// Display value, already formatted
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sparkline: Option<Vec<f64>>,
    pub trend: KpiTrend,
    pub trend_value: String,
    pub status: KpiStatus,
    pub alert: bool,
    pub info: String,
}

/// Column a lot table can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum LotSortField {
    Number,
    Product,
    #[default]
    StartDate,
    DueDate,
    Status,
    RftRate,
    Errors,
    CycleTime,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Search, filter and sort options for the lot table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotQuery {
    /// Case-insensitive match on number, product or customer
    #[serde(default)]
    pub search: Option<String>,
    /// `None` means all statuses
    #[serde(default)]
    pub status: Option<LotStatus>,
    #[serde(default)]
    pub sort_field: LotSortField,
    #[serde(default)]
    pub sort_direction: SortDirection,
}

impl LotQuery {
    /// Set the search term
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restrict to one status
    pub fn with_status(mut self, status: LotStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set sort column and direction
    pub fn sorted_by(mut self, field: LotSortField, direction: SortDirection) -> Self {
        self.sort_field = field;
        self.sort_direction = direction;
        self
    }
}

/// Trailing range for the RFT trend chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    #[default]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    Year,
}

impl TimeRange {
    /// Days covered by the range
    pub fn days(&self) -> u64 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
            TimeRange::Year => 365,
        }
    }

    /// Parse the short form used by the chart controls
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "7d" => Some(TimeRange::Week),
            "30d" => Some(TimeRange::Month),
            "90d" => Some(TimeRange::Quarter),
            "1y" => Some(TimeRange::Year),
            _ => None,
        }
    }
}

/// Export format for lot data
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Export request parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Which lots to export
    #[serde(default)]
    pub query: LotQuery,
    pub format: ExportFormat,
    /// Include summary trailer/object
    #[serde(default)]
    pub include_summary: bool,
}

/// Export result with data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    /// Exported data as string (CSV or JSON)
    pub data: String,
    pub lot_count: usize,
    pub summary: Option<DashboardSummary>,
    pub suggested_filename: String,
}

/// Lots matching a query, in table order
pub type LotRows = Vec<LotData>;

/// Drill-down for one selected lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotDetail {
    pub lot: LotData,
    /// The lot's timeline events, in timeline order
    pub timeline_events: Vec<TimelineEvent>,
    /// Insights raised for this lot; plant-wide insights are not included
    pub insights: Vec<PredictiveInsight>,
}
