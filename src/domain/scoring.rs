//! Confidence scoring and action selection.
//!
//! Scoring is a fixed, ordered table of rules. Each rule is a ladder of tiers
//! checked top to bottom; the first tier whose predicate holds contributes its
//! points and note, and the remaining tiers of that rule are skipped. Every
//! rule is always evaluated, so contributions are purely additive.
//!
//! | rule      | tiers (points)                                               |
//! |-----------|--------------------------------------------------------------|
//! | rsi       | <30 (25), >70 (25), <40 (10), >60 (10)                       |
//! | macd      | bullish crossover (20), bearish crossover (20)               |
//! | bollinger | below lower (20), above upper (20), below/above middle (5)   |
//! | vwap      | above (15), below (15)                                       |
//! | trend     | full alignment (20), partial alignment (10)                  |
//! | volume    | >1.5x 20-bar average (10), >1.2x (5)                         |

use crate::domain::signal::{Action, Contribution, IndicatorSnapshot};

pub const MAX_CONFIDENCE: u32 = 100;
pub const STRONG_CONFIDENCE: u32 = 70;
pub const MODERATE_CONFIDENCE: u32 = 50;
pub const NO_SIGNAL_REASON: &str = "No clear signal detected.";

/// Everything the rules look at: current readings plus the volume context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalContext {
    pub price: f64,
    pub indicators: IndicatorSnapshot,
    pub current_volume: f64,
    pub average_volume: f64,
}

pub struct Tier {
    pub predicate: fn(&SignalContext) -> bool,
    pub points: u32,
    pub note: &'static str,
}

pub struct ScoringRule {
    pub name: &'static str,
    pub tiers: &'static [Tier],
}

impl ScoringRule {
    pub fn evaluate(&self, ctx: &SignalContext) -> Option<Contribution> {
        self.tiers
            .iter()
            .find(|tier| (tier.predicate)(ctx))
            .map(|tier| Contribution {
                rule: self.name,
                points: tier.points,
                note: tier.note,
            })
    }
}

pub static SCORING_RULES: &[ScoringRule] = &[
    ScoringRule {
        name: "rsi",
        tiers: &[
            Tier {
                predicate: rsi_oversold,
                points: 25,
                note: "RSI oversold (<30).",
            },
            Tier {
                predicate: rsi_overbought,
                points: 25,
                note: "RSI overbought (>70).",
            },
            Tier {
                predicate: rsi_approaching_oversold,
                points: 10,
                note: "RSI approaching oversold.",
            },
            Tier {
                predicate: rsi_approaching_overbought,
                points: 10,
                note: "RSI approaching overbought.",
            },
        ],
    },
    ScoringRule {
        name: "macd",
        tiers: &[
            Tier {
                predicate: macd_bullish_crossover,
                points: 20,
                note: "MACD bullish crossover (12,26,9).",
            },
            Tier {
                predicate: macd_bearish_crossover,
                points: 20,
                note: "MACD bearish crossover (12,26,9).",
            },
        ],
    },
    ScoringRule {
        name: "bollinger",
        tiers: &[
            Tier {
                predicate: below_lower_band,
                points: 20,
                note: "Price below lower Bollinger Band.",
            },
            Tier {
                predicate: above_upper_band,
                points: 20,
                note: "Price above upper Bollinger Band.",
            },
            Tier {
                predicate: below_middle_band,
                points: 5,
                note: "Price below Bollinger middle.",
            },
            Tier {
                predicate: above_middle_band,
                points: 5,
                note: "Price above Bollinger middle.",
            },
        ],
    },
    ScoringRule {
        name: "vwap",
        tiers: &[
            Tier {
                predicate: above_vwap,
                points: 15,
                note: "Price above VWAP (bullish).",
            },
            Tier {
                predicate: below_vwap,
                points: 15,
                note: "Price below VWAP (bearish).",
            },
        ],
    },
    ScoringRule {
        name: "trend",
        tiers: &[
            Tier {
                predicate: full_uptrend,
                points: 20,
                note: "Strong uptrend with moving averages aligned.",
            },
            Tier {
                predicate: full_downtrend,
                points: 20,
                note: "Strong downtrend with moving averages aligned.",
            },
            Tier {
                predicate: partial_uptrend,
                points: 10,
                note: "Price above key moving averages.",
            },
            Tier {
                predicate: partial_downtrend,
                points: 10,
                note: "Price below key moving averages.",
            },
        ],
    },
    ScoringRule {
        name: "volume",
        tiers: &[
            Tier {
                predicate: high_volume,
                points: 10,
                note: "High volume confirmation.",
            },
            Tier {
                predicate: above_average_volume,
                points: 5,
                note: "Above average volume.",
            },
        ],
    },
];

fn rsi_oversold(ctx: &SignalContext) -> bool {
    ctx.indicators.rsi < 30.0
}

fn rsi_overbought(ctx: &SignalContext) -> bool {
    ctx.indicators.rsi > 70.0
}

fn rsi_approaching_oversold(ctx: &SignalContext) -> bool {
    ctx.indicators.rsi < 40.0
}

fn rsi_approaching_overbought(ctx: &SignalContext) -> bool {
    ctx.indicators.rsi > 60.0
}

// Crossovers need histogram confirmation; macd above signal alone scores nothing.
fn macd_bullish_crossover(ctx: &SignalContext) -> bool {
    let m = ctx.indicators.macd;
    m.macd > m.signal && m.histogram > 0.0
}

fn macd_bearish_crossover(ctx: &SignalContext) -> bool {
    let m = ctx.indicators.macd;
    m.macd < m.signal && m.histogram < 0.0
}

fn below_lower_band(ctx: &SignalContext) -> bool {
    ctx.price < ctx.indicators.bollinger_bands.lower
}

fn above_upper_band(ctx: &SignalContext) -> bool {
    ctx.price > ctx.indicators.bollinger_bands.upper
}

fn below_middle_band(ctx: &SignalContext) -> bool {
    ctx.price < ctx.indicators.bollinger_bands.middle
}

fn above_middle_band(ctx: &SignalContext) -> bool {
    ctx.price > ctx.indicators.bollinger_bands.middle
}

fn above_vwap(ctx: &SignalContext) -> bool {
    ctx.price > ctx.indicators.vwap
}

fn below_vwap(ctx: &SignalContext) -> bool {
    ctx.price < ctx.indicators.vwap
}

fn full_uptrend(ctx: &SignalContext) -> bool {
    let ma = ctx.indicators.moving_averages;
    ctx.price > ma.sma20 && ma.sma20 > ma.sma50 && ma.sma50 > ma.sma200
}

fn full_downtrend(ctx: &SignalContext) -> bool {
    let ma = ctx.indicators.moving_averages;
    ctx.price < ma.sma20 && ma.sma20 < ma.sma50 && ma.sma50 < ma.sma200
}

fn partial_uptrend(ctx: &SignalContext) -> bool {
    let ma = ctx.indicators.moving_averages;
    ctx.price > ma.sma20 && ma.sma20 > ma.sma50
}

fn partial_downtrend(ctx: &SignalContext) -> bool {
    let ma = ctx.indicators.moving_averages;
    ctx.price < ma.sma20 && ma.sma20 < ma.sma50
}

fn high_volume(ctx: &SignalContext) -> bool {
    ctx.current_volume > ctx.average_volume * 1.5
}

fn above_average_volume(ctx: &SignalContext) -> bool {
    ctx.current_volume > ctx.average_volume * 1.2
}

/// Result of running every scoring rule once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreCard {
    pub contributions: Vec<Contribution>,
}

impl ScoreCard {
    /// Unclamped sum of all contributions (at most 135).
    pub fn raw_total(&self) -> u32 {
        self.contributions.iter().map(|c| c.points).sum()
    }

    pub fn confidence(&self) -> u32 {
        self.raw_total().min(MAX_CONFIDENCE)
    }

    /// Matched notes in rule order, or the fallback sentence when none matched.
    pub fn reason(&self) -> String {
        if self.contributions.is_empty() {
            return NO_SIGNAL_REASON.to_string();
        }
        self.contributions
            .iter()
            .map(|c| c.note)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn score(ctx: &SignalContext) -> ScoreCard {
    let contributions = SCORING_RULES
        .iter()
        .filter_map(|rule| rule.evaluate(ctx))
        .inspect(|c| tracing::debug!(rule = c.rule, points = c.points, "rule matched"))
        .collect();
    ScoreCard { contributions }
}

/// Pick an action from the accumulated score and corroborating readings.
///
/// High confidence alone never triggers an action: one of the tier's patterns
/// must also match, otherwise the result is `Hold`.
pub fn select_action(total: u32, ctx: &SignalContext) -> Action {
    let ind = &ctx.indicators;
    let price = ctx.price;
    let rsi = ind.rsi;
    let macd_above = ind.macd.macd > ind.macd.signal;
    let macd_below = ind.macd.macd < ind.macd.signal;
    let bands = ind.bollinger_bands;
    let ma = ind.moving_averages;

    if total >= STRONG_CONFIDENCE {
        if rsi < 30.0 && price < bands.lower && macd_above && price > ind.vwap {
            Action::Buy
        } else if rsi > 70.0 && price > bands.upper && macd_below && price < ind.vwap {
            Action::Sell
        } else if price < ma.sma20 && ma.sma20 < ma.sma50 && price < ind.vwap && rsi > 50.0 {
            Action::Short
        } else {
            Action::Hold
        }
    } else if total >= MODERATE_CONFIDENCE {
        if rsi < 35.0 && price < ind.vwap && macd_above {
            Action::Buy
        } else if rsi > 65.0 && price > ind.vwap && macd_below {
            Action::Sell
        } else {
            Action::Hold
        }
    } else {
        Action::Hold
    }
}
