//! Ordinary least squares of a series against its zero-based index

/// Best-fit line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Model {
    pub slope: f64,
    pub intercept: f64,
}

impl Model {
    /// Value of the line at index `x`
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a line through `series`, `None` with fewer than two points
///
/// Also `None` if the sums overflow and the closed form is not finite.
pub fn fit(series: &[f64]) -> Option<Model> {
    if series.len() < 2 {
        return None;
    }
    let n = series.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in series.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }
    let denom = n * sum_x2 - sum_x * sum_x;
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    if slope.is_finite() && intercept.is_finite() {
        Some(Model { slope, intercept })
    } else {
        None
    }
}

/// Arithmetic mean, `0` for an empty series
pub fn mean(series: &[f64]) -> f64 {
    if series.is_empty() {
        0.0
    } else {
        series.iter().sum::<f64>() / series.len() as f64
    }
}

/// Coefficient of determination of `model` against `series`
///
/// A constant series has nothing to explain: its R² is `0`.
pub fn r_squared(model: &Model, series: &[f64]) -> f64 {
    let avg = mean(series);
    let (mut ss_total, mut ss_residual) = (0.0, 0.0);
    for (i, &y) in series.iter().enumerate() {
        ss_total += (y - avg).powi(2);
        ss_residual += (y - model.at(i as f64)).powi(2);
    }
    if ss_total == 0.0 {
        0.0
    } else {
        1.0 - ss_residual / ss_total
    }
}

/// Round to `decimals` places, halves going toward positive infinity
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale + 0.5).floor() / scale
}
