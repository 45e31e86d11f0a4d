//! Timeline Extractor
//!
//! Milestone and error events per lot, sorted by date across all lots.

use lot_dashboard_core::RawRecord;

use super::context::NormalizeContext;
use super::fields::{is_error_record, ERROR_EVENT, INPUT_DATE, MILESTONES};
use super::grouper::LotGroups;
use crate::models::dashboard::{EventStatus, TimelineEvent};

/// Emit every milestone and error event found on the grouped records.
///
/// Records that resolved to no lot have nobody to attach events to, so
/// only grouped records are scanned.
pub fn extract_timeline(groups: &LotGroups<'_>, ctx: &NormalizeContext) -> Vec<TimelineEvent> {
    let mut events: Vec<TimelineEvent> = groups
        .iter()
        .flat_map(|(lot, records)| records.iter().flat_map(move |r| record_events(lot, r, ctx)))
        .collect();

    // stable: same-day events keep lot/record/milestone order
    events.sort_by_key(|e| e.date);
    events
}

fn record_events(lot: &str, record: &RawRecord, ctx: &NormalizeContext) -> Vec<TimelineEvent> {
    let mut events: Vec<TimelineEvent> = MILESTONES
        .iter()
        .filter_map(|(field, event)| {
            record.date(field).map(|date| TimelineEvent {
                lot: lot.to_string(),
                event: event.to_string(),
                date,
                status: EventStatus::Complete,
            })
        })
        .collect();

    // flagged records only; the "Internal RFT" label rule counts errors but adds no event
    if is_error_record(record) {
        events.push(TimelineEvent {
            lot: lot.to_string(),
            event: ERROR_EVENT.to_string(),
            date: record.date(INPUT_DATE).unwrap_or(ctx.today),
            status: EventStatus::Error,
        });
    }
    events
}
