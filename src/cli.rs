//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report::TextReportAdapter;
use crate::domain::error::WarelogError;
use crate::domain::filter::{self, FilterCriteria, OperationFilter, OperatorFilter};
use crate::domain::summary::Summary;
use crate::domain::table::TransactionTable;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

/// The original selector offers three item inputs; more than three names is a
/// criteria error rather than a silent truncation.
pub const MAX_ITEM_NAMES: usize = 3;

#[derive(Parser, Debug)]
#[command(name = "warelog", about = "Warehouse transaction history reporting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Filter the transaction history and print a report with totals
    Report {
        /// Directory of CSV source files (overrides [data] folder)
        #[arg(short, long)]
        data: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Inclusive start date, YYYY-MM-DD (defaults to the earliest record)
        #[arg(long)]
        start: Option<String>,
        /// Inclusive end date, YYYY-MM-DD (defaults to the latest record)
        #[arg(long)]
        end: Option<String>,
        /// Item name to include; repeat up to three times
        #[arg(short, long)]
        item: Vec<String>,
        /// deposit, withdraw or both
        #[arg(long)]
        operation: Option<String>,
        /// Operator name, or "all"
        #[arg(long)]
        operator: Option<String>,
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List distinct operator names in the loaded history
    Operators {
        #[arg(short, long)]
        data: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List distinct item names in the loaded history
    Items {
        #[arg(short, long)]
        data: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show record count and date range of the loaded history
    Info {
        #[arg(short, long)]
        data: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Filter values taken from the command line, before defaults from config and
/// the loaded table are applied.
#[derive(Debug, Default, Clone)]
pub struct CriteriaOverrides {
    pub start: Option<String>,
    pub end: Option<String>,
    pub items: Vec<String>,
    pub operation: Option<String>,
    pub operator: Option<String>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Report {
            data,
            config,
            start,
            end,
            item,
            operation,
            operator,
            output,
        } => {
            let overrides = CriteriaOverrides {
                start,
                end,
                items: item,
                operation,
                operator,
            };
            run_report(data.as_ref(), config.as_ref(), &overrides, output.as_ref())
        }
        Command::Operators { data, config } => run_operators(data.as_ref(), config.as_ref()),
        Command::Items { data, config } => run_items(data.as_ref(), config.as_ref()),
        Command::Info { data, config } => run_info(data.as_ref(), config.as_ref()),
    }
}

fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = WarelogError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// The data directory: `--data` wins, then `[data] folder` from config.
pub fn resolve_data_dir(
    flag: Option<&PathBuf>,
    config: Option<&dyn ConfigPort>,
) -> Result<PathBuf, WarelogError> {
    if let Some(dir) = flag {
        return Ok(dir.clone());
    }
    if let Some(config) = config {
        if let Some(folder) = config.get_string("data", "folder") {
            return Ok(PathBuf::from(folder));
        }
    }
    Err(WarelogError::ConfigMissing {
        section: "data".into(),
        key: "folder".into(),
    })
}

fn parse_date_flag(value: &str, flag: &str) -> Result<NaiveDate, WarelogError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| WarelogError::InvalidCriteria {
        reason: format!("invalid {flag} date {value:?} (expected YYYY-MM-DD)"),
    })
}

fn parse_date_config(value: &str, key: &str) -> Result<NaiveDate, WarelogError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| WarelogError::ConfigInvalid {
        section: "filters".into(),
        key: key.into(),
        reason: "invalid date format (expected YYYY-MM-DD)".into(),
    })
}

fn resolve_date(
    flag: Option<&str>,
    flag_name: &str,
    config: Option<&dyn ConfigPort>,
    config_key: &str,
    table_default: Option<NaiveDate>,
) -> Result<NaiveDate, WarelogError> {
    if let Some(value) = flag {
        return parse_date_flag(value, flag_name);
    }
    if let Some(config) = config {
        if let Some(value) = config.get_string("filters", config_key) {
            return parse_date_config(&value, config_key);
        }
    }
    // An empty table has no range; the bounds are arbitrary since the result
    // is empty either way.
    Ok(table_default.unwrap_or(NaiveDate::MIN))
}

/// Resolve the full filter criteria: CLI flags override config values, and the
/// date bounds fall back to the loaded table's range, mirroring the original
/// dashboard's date pickers defaulting to the data extents.
pub fn build_criteria(
    overrides: &CriteriaOverrides,
    config: Option<&dyn ConfigPort>,
    table: &TransactionTable,
) -> Result<FilterCriteria, WarelogError> {
    let range = table.date_range();

    let start_date = resolve_date(
        overrides.start.as_deref(),
        "--start",
        config,
        "start_date",
        range.map(|(min, _)| min),
    )?;
    let end_date = resolve_date(
        overrides.end.as_deref(),
        "--end",
        config,
        "end_date",
        range.map(|(_, max)| max),
    )?;

    let raw_items: Vec<String> = if !overrides.items.is_empty() {
        overrides.items.clone()
    } else {
        config
            .and_then(|c| c.get_string("filters", "items"))
            .map(|items| items.split(',').map(str::to_string).collect())
            .unwrap_or_default()
    };

    let operation = match overrides
        .operation
        .clone()
        .or_else(|| config.and_then(|c| c.get_string("filters", "operation")))
    {
        Some(label) => {
            OperationFilter::parse(&label).ok_or_else(|| WarelogError::InvalidCriteria {
                reason: format!("unknown operation {label:?} (expected deposit, withdraw or both)"),
            })?
        }
        None => OperationFilter::Both,
    };

    let operator = overrides
        .operator
        .clone()
        .or_else(|| config.and_then(|c| c.get_string("filters", "operator")))
        .map(|label| OperatorFilter::parse(&label))
        .unwrap_or(OperatorFilter::All);

    let criteria = FilterCriteria::new(start_date, end_date, raw_items, operation, operator);
    if criteria.item_names.len() > MAX_ITEM_NAMES {
        return Err(WarelogError::InvalidCriteria {
            reason: format!("at most {MAX_ITEM_NAMES} item names may be given"),
        });
    }

    Ok(criteria)
}

fn load_table(
    data_flag: Option<&PathBuf>,
    config: Option<&dyn ConfigPort>,
) -> Result<TransactionTable, WarelogError> {
    let dir = resolve_data_dir(data_flag, config)?;
    eprintln!("Loading records from {}", dir.display());

    let adapter = CsvAdapter::new(dir);
    let records = adapter.load_records()?;
    eprintln!("Loaded {} records", records.len());

    Ok(TransactionTable::from_records(records))
}

/// The full report pipeline against an already-loaded table: resolve criteria,
/// filter, aggregate, render.
pub fn run_report_pipeline(
    table: &TransactionTable,
    overrides: &CriteriaOverrides,
    config: Option<&dyn ConfigPort>,
    report_port: &dyn ReportPort,
    out: &mut dyn std::io::Write,
) -> Result<(), WarelogError> {
    let criteria = build_criteria(overrides, config, table)?;
    let view = filter::apply(table, &criteria);
    let summary = Summary::compute(&view);
    report_port.write(&view, &summary, &criteria, out)
}

fn run_report(
    data: Option<&PathBuf>,
    config_path: Option<&PathBuf>,
    overrides: &CriteriaOverrides,
    output: Option<&PathBuf>,
) -> ExitCode {
    let config = match config_path.map(load_config).transpose() {
        Ok(c) => c,
        Err(code) => return code,
    };
    let config_port = config.as_ref().map(|c| c as &dyn ConfigPort);

    let table = match load_table(data, config_port) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let report = TextReportAdapter::new();
    let result = match output {
        Some(path) => match File::create(path) {
            Ok(mut file) => {
                let r = run_report_pipeline(&table, overrides, config_port, &report, &mut file);
                if r.is_ok() {
                    eprintln!("Report written to: {}", path.display());
                }
                r
            }
            Err(e) => Err(WarelogError::Io(e)),
        },
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            run_report_pipeline(&table, overrides, config_port, &report, &mut lock)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_listing(
    data: Option<&PathBuf>,
    config_path: Option<&PathBuf>,
    extract: fn(&TransactionTable) -> Vec<String>,
    what: &str,
) -> ExitCode {
    let config = match config_path.map(load_config).transpose() {
        Ok(c) => c,
        Err(code) => return code,
    };
    let config_port = config.as_ref().map(|c| c as &dyn ConfigPort);

    let table = match load_table(data, config_port) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let names = extract(&table);
    if names.is_empty() {
        eprintln!("No {what} found");
    } else {
        for name in &names {
            println!("{}", name);
        }
        eprintln!("{} {what} found", names.len());
    }
    ExitCode::SUCCESS
}

fn run_operators(data: Option<&PathBuf>, config_path: Option<&PathBuf>) -> ExitCode {
    run_listing(data, config_path, TransactionTable::operators, "operators")
}

fn run_items(data: Option<&PathBuf>, config_path: Option<&PathBuf>) -> ExitCode {
    run_listing(data, config_path, TransactionTable::item_names, "items")
}

fn run_info(data: Option<&PathBuf>, config_path: Option<&PathBuf>) -> ExitCode {
    let config = match config_path.map(load_config).transpose() {
        Ok(c) => c,
        Err(code) => return code,
    };
    let config_port = config.as_ref().map(|c| c as &dyn ConfigPort);

    let dir = match resolve_data_dir(data, config_port) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let adapter = CsvAdapter::new(dir);
    match adapter.data_summary() {
        Ok(summary) => {
            match summary.date_range {
                Some((min, max)) => {
                    println!("{} records, {} to {}", summary.record_count, min, max);
                }
                None => println!("0 records"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
