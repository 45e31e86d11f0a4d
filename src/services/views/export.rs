//! Export Functionality
//!
//! CSV and JSON export of the lot table, optionally with the summary
//! counters appended.

use std::io::Write;

use chrono::{DateTime, Utc};

use super::lot_table::query_lots;
use crate::models::dashboard::{DashboardData, DashboardSummary, LotData};
use crate::models::views::{ExportFormat, ExportRequest, ExportResult};
use crate::utils::error::{AppError, AppResult};

const CSV_HEADER: &str = "id,number,product,customer,start_date,due_date,status,rft_rate,errors,error_types,cycle_time,cycle_time_target,bulk_batch,strength";

/// Export the lots selected by the request's query
pub fn export_lots(
    data: &DashboardData,
    request: &ExportRequest,
    exported_at: DateTime<Utc>,
) -> AppResult<ExportResult> {
    let lots = query_lots(data, &request.query);
    let summary = request.include_summary.then(|| data.summary.clone());
    let stamp = exported_at.format("%Y%m%d_%H%M%S");

    let (data, filename) = match request.format {
        ExportFormat::Csv => (
            lots_to_csv(&lots, summary.as_ref())?,
            format!("lot_export_{}.csv", stamp),
        ),
        ExportFormat::Json => (
            lots_to_json(&lots, summary.as_ref(), exported_at)?,
            format!("lot_export_{}.json", stamp),
        ),
    };

    Ok(ExportResult {
        data,
        lot_count: lots.len(),
        summary,
        suggested_filename: filename,
    })
}

fn io_err(e: std::io::Error) -> AppError {
    AppError::internal(e.to_string())
}

/// Export to CSV format
fn lots_to_csv(lots: &[LotData], summary: Option<&DashboardSummary>) -> AppResult<String> {
    let mut output = Vec::new();

    writeln!(output, "{}", CSV_HEADER).map_err(io_err)?;

    for lot in lots {
        writeln!(
            output,
            "{},{},{},{},{},{},{},{:.1},{},{},{},{},{},{}",
            csv_escape(&lot.id),
            csv_escape(&lot.number),
            csv_escape(&lot.product),
            csv_escape(&lot.customer),
            lot.start_date,
            lot.due_date,
            csv_escape(lot.status.label()),
            lot.rft_rate,
            lot.errors,
            csv_escape(&lot.error_types.join("; ")),
            lot.cycle_time,
            lot.cycle_time_target,
            csv_escape(lot.bulk_batch.as_deref().unwrap_or("")),
            lot.strength.map(|s| s.to_string()).unwrap_or_default(),
        )
        .map_err(io_err)?;
    }

    if let Some(stats) = summary {
        writeln!(output, "\n# Summary").map_err(io_err)?;
        writeln!(output, "# Lot Count: {}", stats.lot_count).map_err(io_err)?;
        writeln!(output, "# RFT Rate: {:.1}%", stats.rft_rate).map_err(io_err)?;
        writeln!(output, "# Average Cycle Time (days): {:.1}", stats.avg_cycle_time)
            .map_err(io_err)?;
        writeln!(output, "# Average Errors: {:.2}", stats.avg_errors).map_err(io_err)?;
        writeln!(output, "# In Progress: {}", stats.in_progress_lots).map_err(io_err)?;
        writeln!(output, "# Complete: {}", stats.completed_lots).map_err(io_err)?;
        writeln!(output, "# On Hold: {}", stats.on_hold_lots).map_err(io_err)?;
        writeln!(output, "# At Risk: {}", stats.at_risk_lots).map_err(io_err)?;
    }

    String::from_utf8(output).map_err(|e| AppError::internal(e.to_string()))
}

/// Export to JSON format
fn lots_to_json(
    lots: &[LotData],
    summary: Option<&DashboardSummary>,
    exported_at: DateTime<Utc>,
) -> AppResult<String> {
    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct ExportData<'a> {
        exported_at: String,
        lot_count: usize,
        summary: Option<&'a DashboardSummary>,
        lots: &'a [LotData],
    }

    let export_data = ExportData {
        exported_at: exported_at.to_rfc3339(),
        lot_count: lots.len(),
        summary,
        lots,
    };

    Ok(serde_json::to_string_pretty(&export_data)?)
}

/// Escape a value for CSV
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
