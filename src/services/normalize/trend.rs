//! Trend Aggregator
//!
//! Daily plant-wide RFT over a trailing window. Every day in the window gets
//! a point: a day without records for a channel carries the previous value
//! forward with a little jitter, so the series never drops to zero.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use lot_dashboard_core::RawRecord;

use super::context::NormalizeContext;
use super::fields::{is_error_record, label, EXTERNAL, INTERNAL, RECORD_DATE_FIELDS, SOURCE};
use crate::models::dashboard::{RftChannel, RftTrendPoint};
use crate::models::settings::PipelineConfig;

/// Amplitude of the carry-forward perturbation, in percentage points
const CARRY_JITTER: f64 = 1.0;

/// Pass/fail tally of one channel on one day
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    total: u32,
    failed: u32,
}

impl Tally {
    fn add(&mut self, failed: bool) {
        self.total += 1;
        if failed {
            self.failed += 1;
        }
    }

    fn rate(&self) -> Option<f64> {
        (self.total > 0).then(|| f64::from(self.total - self.failed) / f64::from(self.total) * 100.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct DayTally {
    overall: Tally,
    internal: Tally,
    external: Tally,
}

impl DayTally {
    fn channel(&self, channel: RftChannel) -> &Tally {
        match channel {
            RftChannel::Overall => &self.overall,
            RftChannel::Internal => &self.internal,
            RftChannel::External => &self.external,
        }
    }
}

/// Builds the daily RFT series
#[derive(Debug, Clone)]
pub struct TrendAggregator {
    window_days: u32,
    points: u32,
}

impl TrendAggregator {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            window_days: config.trend_window_days.max(1),
            points: config.trend_points.max(1),
        }
    }

    /// Compute the window ending at `ctx.today` and return its most recent points
    pub fn aggregate(&self, records: &[RawRecord], ctx: &mut NormalizeContext) -> Vec<RftTrendPoint> {
        let end = ctx.today;
        let start = end
            .checked_sub_days(Days::new(u64::from(self.window_days - 1)))
            .unwrap_or(end);

        let tallies = bucket(records, start, end);
        tracing::debug!(
            "[Trend] {} of {} records dated inside {}..={}",
            tallies.values().map(|t| t.overall.total).sum::<u32>(),
            records.len(),
            start,
            end
        );

        let mut previous = [
            RftChannel::Overall.baseline(),
            RftChannel::Internal.baseline(),
            RftChannel::External.baseline(),
        ];
        let mut series = Vec::with_capacity(self.window_days as usize);
        let empty = DayTally::default();

        for date in start.iter_days().take_while(|d| *d <= end) {
            let day = tallies.get(&date).unwrap_or(&empty);
            let mut values = [0.0; 3];
            for (slot, channel) in RftChannel::ALL.into_iter().enumerate() {
                let raw = match day.channel(channel).rate() {
                    Some(rate) => rate,
                    None => previous[slot] + ctx.jitter().spread(CARRY_JITTER),
                };
                values[slot] = channel.clamp(raw);
            }
            previous = values;
            series.push(RftTrendPoint {
                date,
                overall: values[0],
                internal: values[1],
                external: values[2],
            });
        }

        let keep = (self.points as usize).min(series.len());
        series.split_off(series.len() - keep)
    }
}

/// Tally records by calendar day, ignoring anything outside `start..=end`
fn bucket(records: &[RawRecord], start: NaiveDate, end: NaiveDate) -> BTreeMap<NaiveDate, DayTally> {
    let mut tallies: BTreeMap<NaiveDate, DayTally> = BTreeMap::new();
    for record in records {
        let Some(date) = record.first_date(RECORD_DATE_FIELDS) else {
            continue;
        };
        if date < start || date > end {
            continue;
        }
        let failed = is_error_record(record);
        let day = tallies.entry(date).or_default();
        day.overall.add(failed);
        if mentions(record, INTERNAL) {
            day.internal.add(failed);
        }
        if mentions(record, EXTERNAL) {
            day.external.add(failed);
        }
    }
    tallies
}

/// Whether the label or `source` names the review channel
fn mentions(record: &RawRecord, channel: &str) -> bool {
    label(record).is_some_and(|l| l.contains(channel))
        || record.text(SOURCE).is_some_and(|s| s.contains(channel))
}
