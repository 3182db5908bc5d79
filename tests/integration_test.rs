//! Integration tests across the domain, ports and adapters.
//!
//! Tests cover:
//! - Signal generation from on-disk CSV history
//! - Bulk scans through a mock data port with partial failures
//! - Scan export through the CSV and JSON report adapters
//! - The JSON shape of an emitted signal

mod common;

use chrono::{DateTime, TimeZone, Utc};
use common::*;
use stockpick::adapters::csv_adapter::CsvAdapter;
use stockpick::adapters::csv_report_adapter::CsvReportAdapter;
use stockpick::adapters::json_report_adapter::JsonReportAdapter;
use stockpick::domain::error::{IndicatorError, StockpickError};
use stockpick::domain::scan::{AnalysisConfig, ScanOutcome, analyze_symbol, run_scan};
use stockpick::domain::series::PriceSeries;
use stockpick::domain::signal::Action;
use stockpick::domain::signal_generator::generate_signal_at;
use stockpick::domain::watchlist::parse_symbols;
use stockpick::ports::data_port::DataPort;
use stockpick::ports::report_port::ReportPort;
use tempfile::TempDir;

fn ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 21, 0, 0).unwrap()
}

fn mock_port() -> MockDataPort {
    MockDataPort::new()
        .with_bars("DOWN", bars_from_closes("DOWN", &declining_closes(), &flat_volumes(200)))
        .with_bars("UP", bars_from_closes("UP", &rising_closes(), &flat_volumes(200)))
        .with_bars("FLAT", bars_from_closes("FLAT", &flat_closes(260), &flat_volumes(260)))
        .with_bars("YOUNG", bars_from_closes("YOUNG", &flat_closes(120), &flat_volumes(120)))
        .with_error("BROKEN", "feed unavailable")
}

mod csv_pipeline {
    use super::*;

    #[test]
    fn analyze_from_csv_directory() {
        let dir = TempDir::new().unwrap();
        write_symbol_csv(
            dir.path(),
            "DOWN",
            &bars_from_closes("DOWN", &declining_closes(), &flat_volumes(200)),
        );
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let analysis = analyze_symbol(&adapter, "DOWN", &AnalysisConfig::default(), ts()).unwrap();

        assert_eq!(analysis.signal.symbol, "DOWN");
        assert_eq!(analysis.signal.confidence, 85);
        assert_eq!(analysis.signal.action, Action::Hold);
        assert_eq!(analysis.quote.price, 71.0);
        assert_eq!(analysis.quote.change, 0.0);
        assert_eq!(analysis.signal.timestamp, ts());
    }

    #[test]
    fn lookback_window_limits_history() {
        let dir = TempDir::new().unwrap();
        let mut closes = vec![400.0; 150];
        closes.extend(declining_closes());
        write_symbol_csv(
            dir.path(),
            "LONG",
            &bars_from_closes("LONG", &closes, &flat_volumes(350)),
        );
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let windowed = analyze_symbol(&adapter, "LONG", &AnalysisConfig::default(), ts()).unwrap();
        assert_eq!(windowed.signal.indicators.moving_averages.sma200, 97.825);

        let full = analyze_symbol(&adapter, "LONG", &AnalysisConfig { lookback: 350 }, ts()).unwrap();
        assert!(full.signal.indicators.vwap > windowed.signal.indicators.vwap);
    }

    #[test]
    fn non_finite_close_fails_instead_of_signalling() {
        let dir = TempDir::new().unwrap();
        let mut closes = flat_closes(220);
        closes[219] = f64::NAN;
        write_symbol_csv(
            dir.path(),
            "NANX",
            &bars_from_closes("NANX", &closes, &flat_volumes(220)),
        );
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let result = analyze_symbol(&adapter, "NANX", &AnalysisConfig::default(), ts());
        match result {
            Err(StockpickError::Data { reason }) => {
                assert!(reason.contains("line 221"), "{}", reason);
                assert!(reason.contains("not finite"), "{}", reason);
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(analysis) => panic!("signal from NaN close: {:?}", analysis.signal.action),
        }
    }

    #[test]
    fn list_symbols_from_csv_directory() {
        let dir = TempDir::new().unwrap();
        for symbol in ["MSFT", "AAPL"] {
            write_symbol_csv(
                dir.path(),
                symbol,
                &bars_from_closes(symbol, &flat_closes(5), &flat_volumes(5)),
            );
        }
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        assert_eq!(adapter.list_symbols().unwrap(), ["AAPL", "MSFT"]);
    }
}

mod bulk_scan {
    use super::*;

    #[test]
    fn scan_records_failures_and_keeps_order() {
        let list = parse_symbols("down, broken; up | young flat ghost down").unwrap();
        assert_eq!(list.symbols, ["DOWN", "BROKEN", "UP", "YOUNG", "FLAT", "GHOST"]);

        let report = run_scan(&mock_port(), &list.symbols, &AnalysisConfig::default(), ts());

        let statuses: Vec<(&str, bool)> = report
            .entries
            .iter()
            .map(|e| (e.symbol.as_str(), e.analysis().is_some()))
            .collect();
        assert_eq!(
            statuses,
            [
                ("DOWN", true),
                ("BROKEN", false),
                ("UP", true),
                ("YOUNG", false),
                ("FLAT", true),
                ("GHOST", false),
            ]
        );

        match &report.entries[3].outcome {
            ScanOutcome::Failed { error } => {
                assert!(error.starts_with("analysis failed for YOUNG"), "{}", error)
            }
            ScanOutcome::Ok(_) => panic!("YOUNG has only 120 bars"),
        }

        assert_eq!(report.summary.total, 6);
        assert_eq!(report.summary.hold, 3);
        assert_eq!(report.summary.failed, 3);
        assert_eq!(report.summary.strong_buy, 0);
    }

    #[test]
    fn mirrored_fixtures_score_equally() {
        let port = mock_port();
        let down = analyze_symbol(&port, "DOWN", &AnalysisConfig::default(), ts()).unwrap();
        let up = analyze_symbol(&port, "UP", &AnalysisConfig::default(), ts()).unwrap();

        assert_eq!(down.signal.confidence, up.signal.confidence);
        assert_eq!(down.signal.indicators.rsi, 0.0);
        assert_eq!(up.signal.indicators.rsi, 100.0);
    }

    #[test]
    fn data_port_error_surfaces_as_data_error() {
        let err = analyze_symbol(&mock_port(), "BROKEN", &AnalysisConfig::default(), ts()).unwrap_err();
        assert!(matches!(err, StockpickError::Data { reason } if reason == "feed unavailable"));
    }
}

mod reports {
    use super::*;

    fn sample_scan() -> stockpick::domain::scan::ScanReport {
        let symbols: Vec<String> = ["DOWN", "FLAT", "GHOST"].iter().map(|s| s.to_string()).collect();
        run_scan(&mock_port(), &symbols, &AnalysisConfig::default(), ts())
    }

    #[test]
    fn csv_export_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("exports/scan.csv");

        CsvReportAdapter::new().write(&sample_scan(), &path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);

        assert_eq!(&rows[0][0], "DOWN");
        assert_eq!(&rows[0][1], "71.00");
        assert_eq!(&rows[0][5], "HOLD");
        assert_eq!(&rows[0][6], "85");
        assert_eq!(&rows[0][8], "BEARISH");
        assert_eq!(&rows[0][9], "NEUTRAL");
        assert_eq!(&rows[0][10], "BELOW");

        assert_eq!(&rows[1][0], "FLAT");
        assert_eq!(&rows[1][11], "No clear signal detected.");

        assert_eq!(&rows[2][0], "GHOST");
        assert_eq!(&rows[2][5], "ERROR");
        assert_eq!(&rows[2][11], "no data for GHOST");
    }

    #[test]
    fn json_export_contains_summary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.json");

        JsonReportAdapter::new().write(&sample_scan(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["summary"]["total"], 3);
        assert_eq!(value["summary"]["hold"], 2);
        assert_eq!(value["summary"]["failed"], 1);
        assert_eq!(value["entries"][0]["signal"]["confidence"], 85);
        assert_eq!(value["entries"][2]["error"], "no data for GHOST");
    }
}

mod signal_contract {
    use super::*;

    #[test]
    fn signal_json_shape() {
        let closes = declining_closes();
        let series = PriceSeries::new(closes.clone(), closes.clone(), closes, flat_volumes(200)).unwrap();
        let signal = generate_signal_at("DOWN", &series, ts()).unwrap();

        let value = serde_json::to_value(&signal).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for key in ["symbol", "action", "confidence", "reason", "indicators", "timestamp"] {
            assert!(keys.contains(&key), "missing {}", key);
        }
        assert_eq!(value["action"], "HOLD");
        assert_eq!(value["timestamp"], "2024-06-03T21:00:00Z");

        let indicators = &value["indicators"];
        assert_eq!(indicators["rsi"], 0.0);
        assert_eq!(indicators["bollingerBands"]["middle"], 80.5);
        assert_eq!(indicators["movingAverages"]["sma200"], 97.825);
        assert!(indicators["macd"]["histogram"].as_f64().unwrap() < 0.0);
        assert_eq!(indicators["vwap"], 97.825);
    }

    #[test]
    fn misaligned_series_rejected_before_generation() {
        let err = PriceSeries::new(flat_closes(200), flat_closes(200), flat_closes(200), flat_volumes(199))
            .unwrap_err();
        assert!(matches!(err, IndicatorError::MisalignedInput { series: "volumes", .. }));
    }
}
