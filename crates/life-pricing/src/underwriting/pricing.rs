use serde::{Deserialize, Serialize};

/// Annual premium per $1,000 of coverage, by attained age. `(upper age, rate)`.
const BASE_RATES: [(f64, f64); 5] = [
    (30.0, 0.60),
    (40.0, 0.80),
    (50.0, 1.50),
    (60.0, 3.00),
    (f64::INFINITY, 6.00),
];

/// Break-even floor relative to the base premium.
const LOW_MARGIN: f64 = 0.85;
/// Competitive ceiling relative to the base premium.
const HIGH_MARGIN: f64 = 1.25;

pub fn base_rate(age: f64) -> f64 {
    BASE_RATES
        .iter()
        .find(|(upper, _)| age < *upper)
        .map(|(_, rate)| *rate)
        .unwrap_or(BASE_RATES[BASE_RATES.len() - 1].1)
}

/// 0.5x at zero risk, 2x at risk 0.5.
pub fn risk_multiplier(risk_score: f64) -> f64 {
    0.5 + risk_score * 3.0
}

/// Where inside the band the recommended premium sits, by risk tier.
pub fn band_position(risk_score: f64) -> f64 {
    if risk_score < 0.3 {
        0.4
    } else if risk_score < 0.6 {
        0.6
    } else {
        0.75
    }
}

/// Annual premium band for one applicant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    pub low: f64,
    pub high: f64,
    /// Recommendation from the band arithmetic alone.
    pub calculated: f64,
    /// Starts equal to `calculated`; callers may move it with [`PriceBand::reposition`].
    pub recommended: f64,
    pub position: f64,
}

impl PriceBand {
    pub fn calculate(age: f64, coverage_amount: u64, risk_score: f64) -> Self {
        let coverage_thousands = coverage_amount as f64 / 1000.0;
        let base_premium = base_rate(age) * coverage_thousands * risk_multiplier(risk_score);

        let low = base_premium * LOW_MARGIN;
        let high = base_premium * HIGH_MARGIN;
        let position = band_position(risk_score);
        let calculated = low + (high - low) * position;

        Self {
            low,
            high,
            calculated,
            recommended: calculated,
            position,
        }
    }

    /// Moves the recommended premium to `position` (clamped to `[0, 1]`) within
    /// the band. Degenerate bands are left untouched. `calculated` never changes.
    pub fn reposition(&mut self, position: f64) -> bool {
        if !position.is_finite() || self.high <= self.low {
            return false;
        }
        let position = position.clamp(0.0, 1.0);
        self.position = position;
        self.recommended = self.low + (self.high - self.low) * position;
        true
    }
}
