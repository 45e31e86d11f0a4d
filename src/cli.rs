use std::path::PathBuf;

use lot_dashboard::models::views::TimeRange;
use lot_dashboard::utils::paths::DEFAULT_PAYLOAD_FILE;

/// What to print on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Kpis,
    Lots,
    Trend,
    Csv,
}

impl View {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "dashboard" => Some(View::Dashboard),
            "kpis" => Some(View::Kpis),
            "lots" => Some(View::Lots),
            "trend" => Some(View::Trend),
            "csv" => Some(View::Csv),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Explicit config file; `None` uses ~/.lot-dashboard/config.json
    pub config_path: Option<PathBuf>,
    /// File path or http(s) URL
    pub input: String,
    pub view: View,
    pub range: TimeRange,
}

enum ParseOutcome {
    Args(CliArgs),
    Help,
}

fn usage() {
    eprintln!(
        "usage:
  lot-dashboard [--config <path>] [--input <path|url>]
                [--view dashboard|kpis|lots|trend|csv] [--range 7d|30d|90d|1y]
"
    );
}

fn parse_args_impl(mut args: impl Iterator<Item = String>) -> Result<ParseOutcome, String> {
    let mut config_path: Option<PathBuf> = None;
    let mut input: Option<String> = None;
    let mut view = View::Dashboard;
    let mut range = TimeRange::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--config requires a value".to_string())?;
                config_path = Some(PathBuf::from(value));
            }
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--input requires a value".to_string())?;
                input = Some(value);
            }
            "--view" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--view requires a value".to_string())?;
                view = View::parse(&value).ok_or_else(|| format!("unknown view: {value}"))?;
            }
            "--range" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--range requires a value".to_string())?;
                range = TimeRange::parse(&value).ok_or_else(|| format!("unknown range: {value}"))?;
            }
            "-h" | "--help" | "help" => {
                return Ok(ParseOutcome::Help);
            }
            other => return Err(format!("unexpected argument: {other}")),
        }
    }

    Ok(ParseOutcome::Args(CliArgs {
        config_path,
        input: input.unwrap_or_else(|| DEFAULT_PAYLOAD_FILE.to_string()),
        view,
        range,
    }))
}

pub fn parse_args() -> CliArgs {
    match parse_args_impl(std::env::args().skip(1)) {
        Ok(ParseOutcome::Args(args)) => args,
        Ok(ParseOutcome::Help) => {
            usage();
            std::process::exit(0);
        }
        Err(error) => {
            eprintln!("error: {error}");
            usage();
            std::process::exit(2);
        }
    }
}
