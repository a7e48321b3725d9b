//! Projection of future spending from a history of period totals
//!
//! Projections follow the best-fit line of the history. When no line can be
//! fitted the current total is simply repeated.

use serde::Serialize;
use tracing::debug;

use crate::lib::{
    regression,
    trend::{analyze_trend, TrendResult},
};

/// Horizons, in periods, for which a cumulative projection is given
pub const HORIZONS: [usize; 3] = [3, 6, 12];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    /// cumulative spending over the next 3 periods
    pub month3: f64,
    /// cumulative spending over the next 6 periods
    pub month6: f64,
    /// cumulative spending over the next 12 periods
    pub month12: f64,
    /// per-period values for the longest horizon
    pub predictions: Vec<f64>,
    pub trend: TrendResult,
}

impl ForecastResult {
    /// Repeat `current_total` in place of a projection
    fn flat(current_total: f64, trend: TrendResult) -> Self {
        Self {
            month3: current_total * 3.0,
            month6: current_total * 6.0,
            month12: current_total * 12.0,
            predictions: vec![current_total; 3],
            trend,
        }
    }

    /// Cumulative projection for one of the `HORIZONS`
    pub fn cumulative(&self, horizon: usize) -> Option<f64> {
        match horizon {
            3 => Some(self.month3),
            6 => Some(self.month6),
            12 => Some(self.month12),
            _ => None,
        }
    }

    /// Average spending per period over one of the `HORIZONS`
    pub fn monthly_average(&self, horizon: usize) -> Option<f64> {
        self.cumulative(horizon).map(|total| total / horizon as f64)
    }
}

/// Values of the best-fit line for the `periods_ahead` periods after `series`
///
/// Never negative: the line is cut at zero. `None` when no line can be
/// fitted.
pub fn predict(series: &[f64], periods_ahead: usize) -> Option<Vec<f64>> {
    let model = regression::fit(series)?;
    let start = series.len();
    Some(
        (1..=periods_ahead)
            .map(|i| model.at((start + i - 1) as f64).max(0.0))
            .collect(),
    )
}

pub fn generate_forecast(series: &[f64], current_total: f64) -> ForecastResult {
    if series.is_empty() {
        debug!(current_total, "empty history, repeating current total");
        return ForecastResult::flat(current_total, analyze_trend(&[current_total]));
    }
    let trend = analyze_trend(series);
    let (p3, p6, p12) = match (
        predict(series, HORIZONS[0]),
        predict(series, HORIZONS[1]),
        predict(series, HORIZONS[2]),
    ) {
        (Some(p3), Some(p6), Some(p12)) => (p3, p6, p12),
        _ => {
            debug!(periods = series.len(), "no regression, repeating current total");
            return ForecastResult::flat(current_total, trend);
        }
    };
    debug!(periods = series.len(), trend = %trend.trend, "forecast from regression");
    ForecastResult {
        month3: p3.iter().sum(),
        month6: p6.iter().sum(),
        month12: p12.iter().sum(),
        predictions: p12,
        trend,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::trend::Trend;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn predict_needs_two_points() {
        assert_eq!(predict(&[], 3), None);
        assert_eq!(predict(&[10.0], 3), None);
        assert_eq!(predict(&[10.0, 11.0], 0), Some(vec![]));
    }

    #[test]
    fn predict_length_and_sign() {
        for series in [
            vec![1.0, 2.0],
            vec![50.0, 40.0, 30.0, 20.0, 10.0],
            vec![0.0, 0.0, 0.0],
            vec![7.0, 3.0, 9.0, 1.0],
        ] {
            for k in [1, 3, 6, 12, 24] {
                let p = predict(&series, k).unwrap();
                assert_eq!(p.len(), k);
                assert!(p.iter().all(|v| *v >= 0.0), "{:?} -> {:?}", series, p);
            }
        }
    }

    #[test]
    fn predict_continues_line() {
        let p = predict(&[10.0, 20.0, 30.0], 3).unwrap();
        assert_relative_eq!(p[0], 40.0, epsilon = 1e-9);
        assert_relative_eq!(p[1], 50.0, epsilon = 1e-9);
        assert_relative_eq!(p[2], 60.0, epsilon = 1e-9);
    }

    #[test]
    fn predict_clamps_at_zero() {
        // line reaches zero at index 5 and keeps going down
        let p = predict(&[50.0, 40.0, 30.0, 20.0, 10.0], 4).unwrap();
        assert_relative_eq!(p[0], 0.0, epsilon = 1e-9);
        assert_eq!(p[1], 0.0);
        assert_eq!(p[3], 0.0);
    }

    #[test]
    fn empty_history() {
        let f = generate_forecast(&[], 50.0);
        assert_eq!(f.month3, 150.0);
        assert_eq!(f.month6, 300.0);
        assert_eq!(f.month12, 600.0);
        assert_eq!(f.predictions, vec![50.0, 50.0, 50.0]);
        assert_eq!(f.trend.trend, Trend::InsufficientData);
        assert_eq!(f.trend.confidence, 0);
        assert_eq!(f.trend.change_percentage, 0.0);
    }

    #[test]
    fn single_point_history() {
        let f = generate_forecast(&[42.0], 40.0);
        assert_eq!(f.month3, 120.0);
        assert_eq!(f.month12, 480.0);
        assert_eq!(f.predictions, vec![40.0; 3]);
        assert_eq!(f.trend.trend, Trend::InsufficientData);
    }

    #[test]
    fn no_line_through_history() {
        let f = generate_forecast(&[f64::MAX; 2], 5.0);
        assert_eq!(f.month3, 15.0);
        assert_eq!(f.month6, 30.0);
        assert_eq!(f.month12, 60.0);
        assert_eq!(f.predictions, vec![5.0; 3]);
        assert_eq!(f.trend.trend, Trend::NoTrend);
    }

    #[test]
    fn horizons_are_sums() {
        let series = [80.0, 85.0, 90.0, 95.0, 100.0, 100.0];
        let f = generate_forecast(&series, 100.0);
        assert_eq!(f.predictions.len(), 12);
        let p3 = predict(&series, 3).unwrap();
        let p6 = predict(&series, 6).unwrap();
        assert_relative_eq!(f.month3, p3.iter().sum::<f64>());
        assert_relative_eq!(f.month6, p6.iter().sum::<f64>());
        assert_relative_eq!(f.month12, f.predictions.iter().sum::<f64>());
        assert_relative_eq!(f.month3, f.predictions[..3].iter().sum::<f64>(), epsilon = 1e-9);
        // not the endpoint value
        assert!(f.month3 > f.predictions[2] * 2.0);
        // the line keeps rising past the last observed period
        let slope = 450.0 / 105.0;
        let intercept = (550.0 - 15.0 * slope) / 6.0;
        assert_relative_eq!(f.predictions[0], intercept + 6.0 * slope, epsilon = 1e-9);
        assert!(f.predictions.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(f.trend, analyze_trend(&series));
    }

    #[test]
    fn averages() {
        let f = generate_forecast(&[], 20.0);
        assert_eq!(f.monthly_average(3), Some(20.0));
        assert_eq!(f.monthly_average(12), Some(20.0));
        assert_eq!(f.monthly_average(5), None);
    }

    #[test]
    fn idempotent() {
        let series = [31.0, 29.5, 35.25, 40.0];
        let a = generate_forecast(&series, 40.0);
        let b = generate_forecast(&series, 40.0);
        assert_eq!(a.month12.to_bits(), b.month12.to_bits());
        assert_eq!(a, b);
    }
}
