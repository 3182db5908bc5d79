//! CLI definition and dispatch.

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::domain::config_validation::{DEFAULT_LOOKBACK, validate_analysis_config, validate_config};
use crate::domain::error::StockpickError;
use crate::domain::scan::{AnalysisConfig, ScanOutcome, ScanReport, analyze_symbol, run_scan};
use crate::domain::series::PriceSeries;
use crate::domain::signal::TradingSignal;
use crate::domain::signal_generator::{IndicatorReadout, indicator_readout};
use crate::domain::watchlist::{WatchList, parse_symbol, parse_symbols};
use crate::logging;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "stockpick", about = "Technical-indicator trading signals")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a trading signal for one symbol
    Analyze {
        #[arg(short, long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Print the latest value of every indicator for one symbol
    Indicators {
        #[arg(short, long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Analyse a watch list and summarise the signals
    Scan {
        /// Free-text symbol list, e.g. "AAPL, MSFT GOOGL"
        #[arg(long)]
        symbols: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Export path; `.json` writes JSON, anything else CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List symbols with price data
    ListSymbols {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Analyze {
            symbol,
            config,
            data_dir,
            format,
        } => run_analyze(&symbol, config.as_deref(), data_dir.as_deref(), format),
        Command::Indicators {
            symbol,
            config,
            data_dir,
            format,
        } => run_indicators(&symbol, config.as_deref(), data_dir.as_deref(), format),
        Command::Scan {
            symbols,
            config,
            data_dir,
            output,
        } => run_scan_command(
            symbols.as_deref(),
            config.as_deref(),
            data_dir.as_deref(),
            output.as_deref(),
        ),
        Command::ListSymbols { config, data_dir } => {
            run_list_symbols(config.as_deref(), data_dir.as_deref())
        }
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Load the config file, or an empty config when none was given, then start
/// logging at the configured level.
pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, StockpickError> {
    let config = match path {
        Some(p) => FileConfigAdapter::from_file(p),
        None => FileConfigAdapter::from_string(""),
    };
    let level = config
        .as_ref()
        .ok()
        .and_then(|c| c.get_string("logging", "level"));
    logging::init(level.as_deref());

    let config = config?;
    if let Some(p) = path {
        tracing::debug!(path = %p.display(), "loaded config");
    }
    Ok(config)
}

pub fn build_analysis_config(config: &dyn ConfigPort) -> Result<AnalysisConfig, StockpickError> {
    validate_analysis_config(config)?;
    let lookback = config.get_int("analysis", "lookback", DEFAULT_LOOKBACK);
    let lookback = usize::try_from(lookback).map_err(|_| StockpickError::ConfigInvalid {
        section: "analysis".to_string(),
        key: "lookback".to_string(),
        reason: format!("lookback {} out of range", lookback),
    })?;
    Ok(AnalysisConfig { lookback })
}

/// `--data-dir` wins over `[data] dir`.
pub fn resolve_data_dir(
    dir_override: Option<&Path>,
    config: &dyn ConfigPort,
) -> Result<PathBuf, StockpickError> {
    if let Some(dir) = dir_override {
        return Ok(dir.to_path_buf());
    }
    match config.get_string("data", "dir") {
        Some(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir.trim())),
        _ => Err(StockpickError::ConfigMissing {
            section: "data".to_string(),
            key: "dir".to_string(),
        }),
    }
}

/// `--symbols` wins over `[analysis] symbols`.
pub fn resolve_symbols(
    symbols_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<WatchList, StockpickError> {
    let raw = match symbols_override {
        Some(s) => s.to_string(),
        None => config
            .get_string("analysis", "symbols")
            .ok_or_else(|| StockpickError::ConfigMissing {
                section: "analysis".to_string(),
                key: "symbols".to_string(),
            })?,
    };
    Ok(parse_symbols(&raw)?)
}

/// `--format` wins over `[output] format`; text otherwise.
pub fn resolve_format(format_override: Option<OutputFormat>, config: &dyn ConfigPort) -> OutputFormat {
    if let Some(f) = format_override {
        return f;
    }
    match config.get_string("output", "format") {
        Some(f) if f.trim().eq_ignore_ascii_case("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, StockpickError> {
    serde_json::to_string_pretty(value).map_err(|e| StockpickError::Report {
        reason: format!("JSON encode error: {}", e),
    })
}

fn run_analyze(
    symbol: &str,
    config_path: Option<&Path>,
    data_dir: Option<&Path>,
    format: Option<OutputFormat>,
) -> Result<(), StockpickError> {
    let config = load_config(config_path)?;
    let analysis_config = build_analysis_config(&config)?;
    let symbol = parse_symbol(symbol)?;
    let adapter = CsvAdapter::new(resolve_data_dir(data_dir, &config)?);

    let analysis = analyze_symbol(&adapter, &symbol, &analysis_config, Utc::now())?;

    match resolve_format(format, &config) {
        OutputFormat::Json => println!("{}", to_json(&analysis.signal)?),
        OutputFormat::Text => print_lines(&format_signal_text(&analysis.signal)),
    }
    Ok(())
}

fn run_indicators(
    symbol: &str,
    config_path: Option<&Path>,
    data_dir: Option<&Path>,
    format: Option<OutputFormat>,
) -> Result<(), StockpickError> {
    let config = load_config(config_path)?;
    let analysis_config = build_analysis_config(&config)?;
    let symbol = parse_symbol(symbol)?;
    let adapter = CsvAdapter::new(resolve_data_dir(data_dir, &config)?);

    let bars = adapter.fetch_ohlcv(&symbol)?;
    if bars.is_empty() {
        return Err(StockpickError::NoData { symbol });
    }
    let series = PriceSeries::from_bars(&bars).tail(analysis_config.lookback);
    let readout = indicator_readout(&series).map_err(|source| StockpickError::Analysis {
        symbol: symbol.clone(),
        source,
    })?;

    match resolve_format(format, &config) {
        OutputFormat::Json => println!("{}", to_json(&readout)?),
        OutputFormat::Text => print_lines(&format_readout_text(&symbol, &readout)),
    }
    Ok(())
}

fn run_scan_command(
    symbols: Option<&str>,
    config_path: Option<&Path>,
    data_dir: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), StockpickError> {
    let config = load_config(config_path)?;
    let analysis_config = build_analysis_config(&config)?;
    let adapter = CsvAdapter::new(resolve_data_dir(data_dir, &config)?);
    let watch_list = resolve_symbols(symbols, &config)?;

    let report = run_scan(&adapter, &watch_list.symbols, &analysis_config, Utc::now());

    match output {
        Some(path) => {
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            let writer: Box<dyn ReportPort> = if is_json {
                Box::new(JsonReportAdapter::new())
            } else {
                Box::new(CsvReportAdapter::new())
            };
            writer.write(&report, path)?;
            println!("{}", format_summary_line(&report));
        }
        None => print_lines(&format_scan_table(&report)),
    }
    Ok(())
}

fn run_list_symbols(config_path: Option<&Path>, data_dir: Option<&Path>) -> Result<(), StockpickError> {
    let config = load_config(config_path)?;
    let adapter = CsvAdapter::new(resolve_data_dir(data_dir, &config)?);

    let symbols = adapter.list_symbols()?;
    for symbol in &symbols {
        println!("{}", symbol);
    }
    tracing::info!(count = symbols.len(), "symbols found");
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), StockpickError> {
    let config = load_config(Some(config_path))?;
    validate_config(&config)?;

    let analysis_config = build_analysis_config(&config)?;
    let data_dir = resolve_data_dir(None, &config)?;
    println!("data dir:  {}", data_dir.display());
    println!("lookback:  {}", analysis_config.lookback);
    if let Ok(list) = resolve_symbols(None, &config) {
        println!("symbols:   {}", list.symbols.join(", "));
    }
    let format = match resolve_format(None, &config) {
        OutputFormat::Text => "text",
        OutputFormat::Json => "json",
    };
    println!("format:    {}", format);
    println!("Configuration is valid.");
    Ok(())
}

/// One line per reading, without trailing newlines.
pub fn format_signal_text(signal: &TradingSignal) -> Vec<String> {
    let ind = &signal.indicators;
    vec![
        format!(
            "{}  {}  confidence {}",
            signal.symbol, signal.action, signal.confidence
        ),
        format!("reason:     {}", signal.reason),
        format!("RSI(14):    {:.2}", ind.rsi),
        format!(
            "MACD:       {:.4} signal {:.4} histogram {:.4}",
            ind.macd.macd, ind.macd.signal, ind.macd.histogram
        ),
        format!(
            "Bollinger:  upper {:.2} middle {:.2} lower {:.2}",
            ind.bollinger_bands.upper, ind.bollinger_bands.middle, ind.bollinger_bands.lower
        ),
        format!(
            "SMA:        20 {:.2} 50 {:.2} 200 {:.2}",
            ind.moving_averages.sma20, ind.moving_averages.sma50, ind.moving_averages.sma200
        ),
        format!("VWAP:       {:.2}", ind.vwap),
        format!("timestamp:  {}", signal.timestamp.to_rfc3339()),
    ]
}

pub fn format_readout_text(symbol: &str, readout: &IndicatorReadout) -> Vec<String> {
    let macd = &readout.macd;
    let bands = &readout.bollinger_bands;
    vec![
        format!("{}  price {:.2}", symbol, readout.price),
        format!("SMA(20)          {:.4}", readout.sma20),
        format!("SMA(50)          {:.4}", readout.sma50),
        format!("SMA(200)         {:.4}", readout.sma200),
        format!("EMA(12)          {:.4}", readout.ema12),
        format!("EMA(26)          {:.4}", readout.ema26),
        format!("RSI(14)          {:.4}", readout.rsi),
        format!(
            "MACD(12,26,9)    {:.4} / {:.4} / {:.4}",
            macd.macd, macd.signal, macd.histogram
        ),
        format!(
            "BOLLINGER(20,2)  {:.4} / {:.4} / {:.4}",
            bands.upper, bands.middle, bands.lower
        ),
        format!(
            "STOCHASTIC(14,3) %K {:.4} %D {:.4}",
            readout.stochastic_k, readout.stochastic_d
        ),
        format!("VWAP             {:.4}", readout.vwap),
    ]
}

pub fn format_summary_line(report: &ScanReport) -> String {
    let s = &report.summary;
    format!(
        "{} symbols: {} buy, {} sell, {} short, {} hold, {} failed, {} strong buy",
        s.total, s.buy, s.sell, s.short, s.hold, s.failed, s.strong_buy
    )
}

/// Header, one row per entry, then the summary line.
pub fn format_scan_table(report: &ScanReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<10} {:>10} {:>8} {:<6} {:>4} {:>7}  Reason",
        "Symbol", "Price", "Change%", "Signal", "Conf", "RSI"
    )];
    lines.extend(report.entries.iter().map(|entry| match &entry.outcome {
        ScanOutcome::Ok(analysis) => format!(
            "{:<10} {:>10.2} {:>8.2} {:<6} {:>4} {:>7.2}  {}",
            entry.symbol,
            analysis.quote.price,
            analysis.quote.change_percent,
            analysis.signal.action,
            analysis.signal.confidence,
            analysis.signal.indicators.rsi,
            analysis.signal.reason
        ),
        ScanOutcome::Failed { error } => format!(
            "{:<10} {:>10} {:>8} {:<6} {:>4} {:>7}  {}",
            entry.symbol, "-", "-", "ERROR", "-", "-", error
        ),
    }));
    lines.push(format_summary_line(report));
    lines
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
