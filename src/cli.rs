//! CLI definition and dispatch.
//!
//! Each subcommand fetches its inputs through [`FileDataAdapter`], runs the
//! relevant engine(s), and prints the result record(s) as JSON on stdout.
//! Progress goes to stderr. A failed fetch is terminal for the whole
//! request: no partial report is printed.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::file_data_adapter::FileDataAdapter;
use crate::domain::analysis::{self, IndicatorReport};
use crate::domain::backtest::{self, BacktestReport};
use crate::domain::derive::{self, FundamentalsReport};
use crate::domain::error::StocklensError;
use crate::domain::settings::AnalysisSettings;
use crate::ports::data_port::MarketDataPort;

#[derive(Parser, Debug)]
#[command(name = "stocklens", about = "Equity analytics: indicators, crossover backtest, fundamentals")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run all three engines and print a combined report
    Analyze {
        #[arg(short, long)]
        data_dir: PathBuf,
        #[arg(short, long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Technical indicators and trend/signal classification only
    Indicators {
        #[arg(short, long)]
        data_dir: PathBuf,
        #[arg(short, long)]
        symbol: String,
    },
    /// SMA crossover backtest only
    Backtest {
        #[arg(short, long)]
        data_dir: PathBuf,
        #[arg(short, long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Fundamental ratio derivations only
    Fundamentals {
        #[arg(short, long)]
        data_dir: PathBuf,
        #[arg(short, long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Combined report: the three engines run over the same symbol's data.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub indicators: IndicatorReport,
    pub backtest: BacktestReport,
    pub fundamentals: FundamentalsReport,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            data_dir,
            symbol,
            config,
        } => run_analyze(&data_dir, &symbol, config.as_ref()),
        Command::Indicators { data_dir, symbol } => run_indicators(&data_dir, &symbol),
        Command::Backtest {
            data_dir,
            symbol,
            config,
        } => run_backtest(&data_dir, &symbol, config.as_ref()),
        Command::Fundamentals {
            data_dir,
            symbol,
            config,
        } => run_fundamentals(&data_dir, &symbol, config.as_ref()),
    }
}

fn load_settings(config_path: Option<&PathBuf>) -> Result<AnalysisSettings, ExitCode> {
    let adapter = match config_path {
        None => FileConfigAdapter::empty(),
        Some(path) => FileConfigAdapter::from_file(path).map_err(|e| {
            let err = StocklensError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            };
            eprintln!("error: {err}");
            ExitCode::from(&err)
        })?,
    };
    AnalysisSettings::from_config(&adapter).map_err(|err| {
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn fail(err: StocklensError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(&err)
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(StocklensError::DataSource {
            reason: format!("failed to serialize report: {e}"),
        }),
    }
}

fn run_analyze(data_dir: &PathBuf, symbol: &str, config_path: Option<&PathBuf>) -> ExitCode {
    let settings = match load_settings(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let data = FileDataAdapter::new(data_dir.clone());

    eprintln!("Loading data for {symbol} from {}", data_dir.display());
    let series = match data.price_series(symbol) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };
    let overview = match data.fundamentals_overview(symbol) {
        Ok(o) => o,
        Err(e) => return fail(e),
    };
    let income = match data.income_statement(symbol) {
        Ok(y) => y,
        Err(e) => return fail(e),
    };
    let balance = match data.balance_sheet(symbol) {
        Ok(y) => y,
        Err(e) => return fail(e),
    };
    let cash = match data.cash_flow(symbol) {
        Ok(y) => y,
        Err(e) => return fail(e),
    };

    eprintln!("Computing analytics ({} bars, {} statement years)", series.len(), income.len());
    let report = AnalysisReport {
        indicators: analysis::analyze(symbol, &series),
        backtest: backtest::run(symbol, &series, settings.crossover),
        fundamentals: derive::derive(&overview, &income, &balance, &cash, settings.ratio_scale),
    };
    print_json(&report)
}

fn run_indicators(data_dir: &PathBuf, symbol: &str) -> ExitCode {
    let data = FileDataAdapter::new(data_dir.clone());
    let series = match data.price_series(symbol) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };
    print_json(&analysis::analyze(symbol, &series))
}

fn run_backtest(data_dir: &PathBuf, symbol: &str, config_path: Option<&PathBuf>) -> ExitCode {
    let settings = match load_settings(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let data = FileDataAdapter::new(data_dir.clone());
    let series = match data.price_series(symbol) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };
    print_json(&backtest::run(symbol, &series, settings.crossover))
}

fn run_fundamentals(data_dir: &PathBuf, symbol: &str, config_path: Option<&PathBuf>) -> ExitCode {
    let settings = match load_settings(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let data = FileDataAdapter::new(data_dir.clone());
    let overview = match data.fundamentals_overview(symbol) {
        Ok(o) => o,
        Err(e) => return fail(e),
    };
    let income = match data.income_statement(symbol) {
        Ok(y) => y,
        Err(e) => return fail(e),
    };
    let balance = match data.balance_sheet(symbol) {
        Ok(y) => y,
        Err(e) => return fail(e),
    };
    let cash = match data.cash_flow(symbol) {
        Ok(y) => y,
        Err(e) => return fail(e),
    };
    print_json(&derive::derive(
        &overview,
        &income,
        &balance,
        &cash,
        settings.ratio_scale,
    ))
}
