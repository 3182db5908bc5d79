//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod csv_report_adapter;
pub mod file_config_adapter;
pub mod json_report_adapter;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::scan::{Analysis, Quote, ScanEntry, ScanOutcome, ScanReport, ScanSummary};
    use crate::domain::signal::{
        Action, BandReading, Contribution, IndicatorSnapshot, MacdReading, MovingAverages,
        TradingSignal,
    };
    use chrono::{TimeZone, Utc};

    /// One strong-buy AAPL entry and one failed entry.
    pub fn sample_report() -> ScanReport {
        let timestamp = Utc.with_ymd_and_hms(2024, 6, 3, 21, 0, 0).unwrap();
        let entries = vec![
            ScanEntry {
                symbol: "AAPL".into(),
                outcome: ScanOutcome::Ok(Analysis {
                    quote: Quote {
                        price: 97.0,
                        change: -3.0,
                        change_percent: -3.0,
                        volume: 1_500_000.0,
                    },
                    signal: TradingSignal {
                        symbol: "AAPL".into(),
                        action: Action::Buy,
                        confidence: 75,
                        reason: "RSI oversold (<30). Price above VWAP (bullish).".into(),
                        indicators: IndicatorSnapshot {
                            rsi: 28.5,
                            macd: MacdReading {
                                macd: 0.4,
                                signal: 0.1,
                                histogram: 0.3,
                            },
                            bollinger_bands: BandReading {
                                upper: 110.0,
                                middle: 100.0,
                                lower: 90.0,
                            },
                            moving_averages: MovingAverages {
                                sma20: 99.0,
                                sma50: 101.0,
                                sma200: 104.0,
                            },
                            vwap: 95.0,
                        },
                        contributions: vec![
                            Contribution {
                                rule: "rsi",
                                points: 25,
                                note: "RSI oversold (<30).",
                            },
                            Contribution {
                                rule: "vwap",
                                points: 15,
                                note: "Price above VWAP (bullish).",
                            },
                        ],
                        timestamp,
                    },
                }),
            },
            ScanEntry {
                symbol: "ZZZZ".into(),
                outcome: ScanOutcome::Failed {
                    error: "no data for ZZZZ".into(),
                },
            },
        ];
        let summary = ScanSummary::from_entries(&entries);
        ScanReport {
            generated_at: timestamp,
            entries,
            summary,
        }
    }
}
