mod cli;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cli::View;
use lot_dashboard::commands;
use lot_dashboard::models::views::{ExportFormat, ExportRequest, LotQuery};
use lot_dashboard::{CommandResponse, DashboardState, DataSource};

/// Unwrap a command envelope into its data
fn into_data<T>(response: Result<CommandResponse<T>, String>) -> Result<T> {
    let response = response.map_err(|e| anyhow!(e))?;
    match (response.success, response.data) {
        (true, Some(data)) => Ok(data),
        _ => Err(anyhow!(response
            .error
            .unwrap_or_else(|| "command returned no data".to_string()))),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();
    let state = DashboardState::with_config_file(args.config_path.clone())
        .context("failed to open dashboard config")?;

    let status = into_data(
        commands::load_dashboard(&state, DataSource::from_arg(&args.input)).await,
    )?;
    if let Some(advisory) = &status.advisory {
        tracing::warn!("[Dashboard] {}", advisory);
    }

    match args.view {
        View::Dashboard => print_json(&into_data(commands::get_dashboard_data(&state).await)?)?,
        View::Kpis => print_json(&into_data(commands::get_kpi_metrics(&state).await)?)?,
        View::Lots => print_json(&into_data(
            commands::query_lots(&state, LotQuery::default()).await,
        )?)?,
        View::Trend => print_json(&into_data(
            commands::get_rft_trend(&state, Some(args.range)).await,
        )?)?,
        View::Csv => {
            let request = ExportRequest {
                query: LotQuery::default(),
                format: ExportFormat::Csv,
                include_summary: true,
            };
            let export = into_data(commands::export_lots(&state, request).await)?;
            print!("{}", export.data);
        }
    }

    Ok(())
}
