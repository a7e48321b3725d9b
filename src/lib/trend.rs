//! Classification of a spending history by the slope of its best-fit line

use serde::Serialize;
use std::fmt;

use crate::lib::regression::{self, round_to};

/// Direction and strength of a spending history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    InsufficientData,
    NoTrend,
    IncreasingRapidly,
    Increasing,
    Stable,
    Decreasing,
    DecreasingRapidly,
}

/// Below this magnitude (in percent per period) a history is stable
const STABLE_BAND: f64 = 2.0;
/// Beyond this magnitude a change is rapid
const RAPID_BAND: f64 = 10.0;

impl Trend {
    /// Label for a relative change, in percent of the mean per period
    pub fn classify(change_percentage: f64) -> Self {
        let c = change_percentage;
        if c.abs() < STABLE_BAND {
            Trend::Stable
        } else if c > RAPID_BAND {
            Trend::IncreasingRapidly
        } else if c > 0.0 {
            Trend::Increasing
        } else if c < -RAPID_BAND {
            Trend::DecreasingRapidly
        } else {
            Trend::Decreasing
        }
    }

    /// Stable tag used in serialized output
    pub fn tag(self) -> &'static str {
        use Trend::*;
        match self {
            InsufficientData => "insufficient_data",
            NoTrend => "no_trend",
            IncreasingRapidly => "increasing_rapidly",
            Increasing => "increasing",
            Stable => "stable",
            Decreasing => "decreasing",
            DecreasingRapidly => "decreasing_rapidly",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    pub trend: Trend,
    /// R² as an integer percentage in 0..=100
    pub confidence: u8,
    /// slope relative to the mean, one decimal
    pub change_percentage: f64,
    /// raw slope of the fitted line, 0 without a model
    pub slope: f64,
}

impl TrendResult {
    fn flat(trend: Trend) -> Self {
        Self {
            trend,
            confidence: 0,
            change_percentage: 0.0,
            slope: 0.0,
        }
    }
}

pub fn analyze_trend(series: &[f64]) -> TrendResult {
    if series.len() < 2 {
        return TrendResult::flat(Trend::InsufficientData);
    }
    let model = match regression::fit(series) {
        Some(model) => model,
        None => return TrendResult::flat(Trend::NoTrend),
    };
    let r2 = regression::r_squared(&model, series);
    let confidence = round_to((r2 * 100.0).clamp(0.0, 100.0), 0) as u8;

    let avg = regression::mean(series);
    let change = if avg == 0.0 {
        0.0
    } else {
        model.slope / avg * 100.0
    };
    TrendResult {
        trend: Trend::classify(change),
        confidence,
        change_percentage: round_to(change, 1),
        slope: model.slope,
    }
}
