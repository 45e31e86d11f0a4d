//! Record Field Names
//!
//! Every raw field the pipeline reads, plus the small record predicates
//! shared by the summarizer, trend aggregator and timeline extractor.

use lot_dashboard_core::RawRecord;

// ============================================================================
// Lot identity
// ============================================================================

/// Direct lot-id fields, highest priority first
pub const DIRECT_LOT_FIELDS: &[&str] = &["fg_batch", "lotNumber", "lot", "woLotNumber", "wo/lot#"];

/// Work-order fields whose digits form a lot number
pub const WORK_ORDER_FIELDS: &[&str] = &["assembly_wo", "cartoning_wo"];

// ============================================================================
// Classification
// ============================================================================

/// Batch/stage label fields
pub const LABEL_FIELDS: &[&str] = &["batchId", "batch_id", "stage"];

pub const HAS_ERRORS: &str = "hasErrors";
pub const ERROR_COUNT: &str = "errorCount";
pub const ERROR_TYPE_FIELDS: &[&str] = &["errorType", "error_type"];
pub const SOURCE: &str = "source";

pub const PROCESS_LABEL: &str = "Process";
pub const INTERNAL_RFT_LABEL: &str = "Internal RFT";
pub const ON_HOLD_LABEL: &str = "On Hold";
pub const INTERNAL: &str = "Internal";
pub const EXTERNAL: &str = "External";

// ============================================================================
// Process attributes
// ============================================================================

pub const RELEASE: &str = "release";
pub const CYCLE_TIME_FIELDS: &[&str] = &[
    "total_cycle_time_",
    "total_cycle_time_(days)",
    "totalCycleTimeDays",
    "cycleTime",
];
pub const STRENGTH: &str = "strength";
pub const BULK_BATCH: &str = "bulk_batch";
pub const BULK_RECEIPT_DATE: &str = "bulk_receipt_date";

// ============================================================================
// Dates
// ============================================================================

/// Fields that place a record on a calendar day, highest priority first
pub const RECORD_DATE_FIELDS: &[&str] = &["date", "input_date", RELEASE];
pub const INPUT_DATE: &str = "input_date";

/// Milestone fields and the timeline label each produces
pub const MILESTONES: &[(&str, &str)] = &[
    (BULK_RECEIPT_DATE, "Bulk Receipt"),
    ("assembly_start", "Assembly Start"),
    ("assembly_finish", "Assembly Finish"),
    ("packaging_start", "Packaging Start"),
    ("packaging_finish", "Packaging Finish"),
    (RELEASE, "Release"),
    ("shipment", "Shipment"),
];

/// Label for error events on the timeline
pub const ERROR_EVENT: &str = "Error Reported";

/// The record's batch/stage label, if any
pub fn label(record: &RawRecord) -> Option<String> {
    record.first_text(LABEL_FIELDS)
}

/// Whether the batch/stage label contains `needle`
pub fn label_contains(record: &RawRecord, needle: &str) -> bool {
    label(record).is_some_and(|l| l.contains(needle))
}

/// `hasErrors` is set or `errorCount` is positive
pub fn is_error_record(record: &RawRecord) -> bool {
    record.flag(HAS_ERRORS) || record.number(ERROR_COUNT).is_some_and(|n| n > 0.0)
}

/// Error-type label of the record
pub fn error_type(record: &RawRecord) -> Option<String> {
    record.first_text(ERROR_TYPE_FIELDS)
}

/// Format a number without a trailing `.0` when it is whole
pub fn display_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
