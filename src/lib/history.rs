//! Ordered series of past period totals, oldest first
//!
//! Periods are implicitly equally spaced: the index is the only notion of time,
//! so a period without spending must be recorded as `0` rather than omitted.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum HistoryError {
    #[error("period {index} has a negative total ({value})")]
    Negative { index: usize, value: f64 },
    #[error("period {index} has a total that is not a finite number")]
    NotFinite { index: usize },
    #[error("period {index} has a total above {max} ({value})", max = History::MAX_TOTAL)]
    TooLarge { index: usize, value: f64 },
}

/// Ratios applied to the current total to fabricate a six-period ramp
const SYNTHETIC_RAMP: [f64; 6] = [0.85, 0.90, 0.95, 0.92, 0.98, 1.0];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    totals: Vec<f64>,
}

impl History {
    /// Largest accepted period total
    pub const MAX_TOTAL: f64 = 1e12;

    pub fn new(totals: Vec<f64>) -> Result<Self, HistoryError> {
        for (index, &value) in totals.iter().enumerate() {
            if !value.is_finite() {
                return Err(HistoryError::NotFinite { index });
            }
            if value < 0.0 {
                return Err(HistoryError::Negative { index, value });
            }
            if value > Self::MAX_TOTAL {
                return Err(HistoryError::TooLarge { index, value });
            }
        }
        Ok(Self { totals })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Six made-up periods ending at `current_total`
    ///
    /// Stand-in for a real record of past totals, only used when explicitly
    /// requested.
    pub fn synthetic(current_total: f64) -> Self {
        let current_total = current_total.max(0.0);
        Self {
            totals: SYNTHETIC_RAMP.iter().map(|r| r * current_total).collect(),
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.totals
    }

}
