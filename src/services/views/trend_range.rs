//! Trend Range Filter

use chrono::{Days, NaiveDate};

use crate::models::dashboard::RftTrendPoint;
use crate::models::views::TimeRange;

/// Points dated on or after `today - range`
pub fn filter_trend(trend: &[RftTrendPoint], range: TimeRange, today: NaiveDate) -> Vec<RftTrendPoint> {
    let cutoff = today
        .checked_sub_days(Days::new(range.days()))
        .unwrap_or(NaiveDate::MIN);
    trend.iter().filter(|p| p.date >= cutoff).cloned().collect()
}
