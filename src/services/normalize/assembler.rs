//! View-Model Assembler
//!
//! Runs the whole normalization pass: payload shape check, grouping,
//! per-lot summaries, then trend, timeline, insights and summary. A pass
//! that ends with no lots returns the backup data set plus an advisory;
//! it never returns an error for data-shape problems.

use std::collections::BTreeMap;

use lot_dashboard_core::RawRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::context::NormalizeContext;
use super::extractor::FieldExtractor;
use super::fallback::fallback_dashboard;
use super::grouper::{LotGrouper, LotGroups};
use super::insights::InsightGenerator;
use super::summarizer::LotSummarizer;
use super::summary::calculate_summary;
use super::timeline::extract_timeline;
use super::trend::TrendAggregator;
use crate::models::dashboard::{DashboardData, LotData};
use crate::models::settings::PipelineConfig;
use crate::utils::error::{AppError, AppResult};

/// Prefix of every advisory attached to the backup data set
pub const FALLBACK_ADVISORY: &str = "using backup data";

/// Where a view-model came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    /// Built from the payload's records
    Records,
    /// The static backup data set
    Fallback,
}

/// Result of one normalization pass
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub data: DashboardData,
    pub origin: DataOrigin,
    /// Set when the backup data set was used
    pub advisory: Option<String>,
}

impl Assembly {
    pub fn is_fallback(&self) -> bool {
        self.origin == DataOrigin::Fallback
    }
}

/// Pull the record list out of a payload.
///
/// Accepts a bare array or an object with a `records` array; anything else
/// has no records. Array elements that are not objects are skipped.
pub fn extract_records(payload: &Value) -> Vec<RawRecord> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("records") {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    items
        .iter()
        .filter_map(|item| RawRecord::from_value(item.clone()))
        .collect()
}

/// Orchestrates the normalization components for one configuration
#[derive(Debug, Clone)]
pub struct DashboardAssembler {
    grouper: LotGrouper,
    summarizer: LotSummarizer,
    trend: TrendAggregator,
    insights: InsightGenerator,
    batch_size: usize,
}

impl DashboardAssembler {
    /// Build the pipeline; fails only for an invalid configuration
    pub fn new(config: &PipelineConfig) -> AppResult<Self> {
        config.validate().map_err(AppError::validation)?;
        Ok(Self {
            grouper: LotGrouper::new(FieldExtractor::new(&config.lot_prefix)?),
            summarizer: LotSummarizer::new(config),
            trend: TrendAggregator::new(config),
            insights: InsightGenerator::new(config.emit_process_improvement),
            batch_size: config.group_batch_size,
        })
    }

    /// The backup view-model this assembler would fall back to
    pub fn fallback(&self) -> DashboardData {
        fallback_dashboard(&self.insights)
    }

    /// Fallback assembly with the given reason in the advisory
    pub fn fallback_assembly(&self, reason: &str) -> Assembly {
        tracing::warn!("[Assembler] {}: {}", FALLBACK_ADVISORY, reason);
        Assembly {
            data: self.fallback(),
            origin: DataOrigin::Fallback,
            advisory: Some(format!("{}: {}", FALLBACK_ADVISORY, reason)),
        }
    }

    /// Assemble from raw payload text; invalid JSON falls back
    pub fn assemble_text(&self, text: &str, ctx: &mut NormalizeContext) -> Assembly {
        match serde_json::from_str::<Value>(text) {
            Ok(payload) => self.assemble(&payload, ctx),
            Err(e) => self.fallback_assembly(&format!("payload is not valid JSON ({})", e)),
        }
    }

    /// Assemble from a parsed payload
    pub fn assemble(&self, payload: &Value, ctx: &mut NormalizeContext) -> Assembly {
        self.assemble_records(&extract_records(payload), ctx)
    }

    /// Assemble from an already extracted record list
    pub fn assemble_records(&self, records: &[RawRecord], ctx: &mut NormalizeContext) -> Assembly {
        if records.is_empty() {
            return self.fallback_assembly("payload has no records");
        }
        let groups = self.grouper.group(records);
        self.finish(records, &groups, ctx)
    }

    /// Like [`DashboardAssembler::assemble_records`], grouping in batches
    /// and yielding to the runtime between them
    pub async fn assemble_records_batched(
        &self,
        records: &[RawRecord],
        ctx: &mut NormalizeContext,
    ) -> Assembly {
        if records.is_empty() {
            return self.fallback_assembly("payload has no records");
        }
        let groups = self.grouper.group_in_batches(records, self.batch_size).await;
        self.finish(records, &groups, ctx)
    }

    fn finish(
        &self,
        records: &[RawRecord],
        groups: &LotGroups<'_>,
        ctx: &mut NormalizeContext,
    ) -> Assembly {
        let lots = self.summarize_all(groups, ctx);
        if lots.is_empty() {
            return self.fallback_assembly("no record carries a lot id");
        }

        let rft_trend = self.trend.aggregate(records, ctx);
        let timeline_events = extract_timeline(groups, ctx);
        let predictions = self.insights.generate(&lots);
        let summary = calculate_summary(&lots);

        tracing::debug!(
            "[Assembler] {} records -> {} lots, {} events, {} insights",
            records.len(),
            lots.len(),
            timeline_events.len(),
            predictions.len()
        );

        Assembly {
            data: DashboardData {
                lots,
                rft_trend,
                timeline_events,
                predictions,
                summary,
            },
            origin: DataOrigin::Records,
            advisory: None,
        }
    }

    /// Summarize every group; a lot whose summary fails is dropped
    fn summarize_all(
        &self,
        groups: &LotGroups<'_>,
        ctx: &mut NormalizeContext,
    ) -> BTreeMap<String, LotData> {
        let mut lots = BTreeMap::new();
        for (id, records) in groups {
            match self.summarizer.summarize(id, records, ctx) {
                Ok(lot) => {
                    lots.insert(id.clone(), lot);
                }
                Err(e) => tracing::warn!("[Assembler] Dropping lot {}: {}", id, e),
            }
        }
        lots
    }
}
