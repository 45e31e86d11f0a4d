//! Summary Calculator

use std::collections::BTreeMap;

use crate::models::dashboard::{DashboardSummary, LotData, LotStatus};

/// Aggregate counters over all lots; all zero for an empty map.
///
/// `rft_rate` here is lot-level: the share of lots with no errors at all.
pub fn calculate_summary(lots: &BTreeMap<String, LotData>) -> DashboardSummary {
    if lots.is_empty() {
        return DashboardSummary::default();
    }

    let count = lots.len();
    let n = count as f64;
    let tally = |status: LotStatus| lots.values().filter(|l| l.status == status).count();

    DashboardSummary {
        lot_count: count,
        rft_rate: lots.values().filter(|l| l.is_right_first_time()).count() as f64 / n * 100.0,
        avg_cycle_time: lots.values().map(|l| l.cycle_time).sum::<f64>() / n,
        avg_errors: lots.values().map(|l| f64::from(l.errors)).sum::<f64>() / n,
        in_progress_lots: tally(LotStatus::InProgress),
        completed_lots: tally(LotStatus::Complete),
        on_hold_lots: tally(LotStatus::OnHold),
        at_risk_lots: tally(LotStatus::AtRisk),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dashboard::fixtures::lot_with;

    #[test]
    fn test_empty_is_all_zero() {
        assert_eq!(calculate_summary(&BTreeMap::new()), DashboardSummary::default());
    }

    #[test]
    fn test_counts_and_averages() {
        let lots: BTreeMap<_, _> = [
            lot_with("NAR0001", LotStatus::InProgress, 0, 10.0),
            lot_with("NAR0002", LotStatus::Complete, 2, 20.0),
            lot_with("NAR0003", LotStatus::AtRisk, 7, 30.0),
            lot_with("NAR0004", LotStatus::InProgress, 0, 20.0),
        ]
        .into_iter()
        .map(|l| (l.id.clone(), l))
        .collect();

        let summary = calculate_summary(&lots);
        assert_eq!(summary.lot_count, 4);
        assert_eq!(summary.rft_rate, 50.0);
        assert_eq!(summary.avg_cycle_time, 20.0);
        assert_eq!(summary.avg_errors, 2.25);
        assert_eq!(summary.in_progress_lots, 2);
        assert_eq!(summary.completed_lots, 1);
        assert_eq!(summary.on_hold_lots, 0);
        assert_eq!(summary.at_risk_lots, 1);
    }
}
