//! Insight Generator
//!
//! Fixed advisory rules over the summarized lots. Rules run one after the
//! other, each over all lots in id order, and ids are numbered in emission
//! order.

use std::collections::BTreeMap;

use crate::models::dashboard::{
    InsightKind, LotData, LotStatus, PredictiveInsight, Severity, ALL_LOTS,
};

/// Cycle time above target by more than this factor is flagged
pub const CYCLE_TIME_TOLERANCE: f64 = 1.2;

/// Rule evaluated per lot
struct Rule {
    kind: InsightKind,
    severity: Severity,
    /// Description for a matching lot, `None` when the lot does not match
    describe: fn(&LotData) -> Option<String>,
    recommendation: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        kind: InsightKind::QualityRisk,
        severity: Severity::High,
        describe: quality_risk,
        recommendation: "Conduct quality review meeting and implement corrective actions.",
    },
    Rule {
        kind: InsightKind::CycleTime,
        severity: Severity::Medium,
        describe: cycle_time,
        recommendation: "Review process bottlenecks and optimize production schedule.",
    },
    Rule {
        kind: InsightKind::ErrorPattern,
        severity: Severity::Medium,
        describe: error_pattern,
        recommendation: "Investigate root cause and retrain operators on the affected step.",
    },
];

fn quality_risk(lot: &LotData) -> Option<String> {
    (lot.status == LotStatus::AtRisk).then(|| {
        format!(
            "Lot {} has {} errors and high risk of failing RFT requirements.",
            lot.id, lot.errors
        )
    })
}

fn cycle_time(lot: &LotData) -> Option<String> {
    if lot.cycle_time <= lot.cycle_time_target * CYCLE_TIME_TOLERANCE {
        return None;
    }
    let overage = lot.cycle_time_overage_percent()?;
    Some(format!(
        "Lot {} cycle time ({} days) exceeds target by {}%.",
        lot.id,
        super::fields::display_number(lot.cycle_time),
        overage.round()
    ))
}

fn error_pattern(lot: &LotData) -> Option<String> {
    lot.error_types.first().map(|kind| {
        format!(
            "Lot {} shows a recurring {} pattern across its records.",
            lot.id, kind
        )
    })
}

/// Generates insights from summarized lots
#[derive(Debug, Clone, Default)]
pub struct InsightGenerator {
    emit_process_improvement: bool,
}

impl InsightGenerator {
    pub fn new(emit_process_improvement: bool) -> Self {
        Self {
            emit_process_improvement,
        }
    }

    /// Apply every rule to every lot, then the optional plant-wide insight
    pub fn generate(&self, lots: &BTreeMap<String, LotData>) -> Vec<PredictiveInsight> {
        let mut insights = Vec::new();
        let mut next_id = 1;
        let mut push = |lot: &str, kind, severity, description: String, recommendation: &str| {
            insights.push(PredictiveInsight {
                id: format!("insight-{}", next_id),
                lot: lot.to_string(),
                kind,
                severity,
                description,
                recommendation: recommendation.to_string(),
            });
            next_id += 1;
        };

        for rule in RULES {
            for lot in lots.values() {
                if let Some(description) = (rule.describe)(lot) {
                    push(&lot.id, rule.kind, rule.severity, description, rule.recommendation);
                }
            }
        }

        if self.emit_process_improvement {
            push(
                ALL_LOTS,
                InsightKind::ProcessImprovement,
                Severity::Low,
                "Assembly process efficiency can be improved based on recent trend analysis."
                    .to_string(),
                "Review staffing levels and equipment calibration schedules.",
            );
        }

        insights
    }
}
