//! Factor weights and the band tables that map raw metrics to scores.
//!
//! Bands are checked in order and the first match wins, so every table ends
//! with a catch-all.

pub const WEIGHT_PAYMENT_HISTORY: i64 = 35;
pub const WEIGHT_UTILIZATION: i64 = 30;
pub const WEIGHT_INCOME_STABILITY: i64 = 15;
pub const WEIGHT_ACCOUNT_DIVERSITY: i64 = 10;
pub const WEIGHT_ACCOUNT_AGE: i64 = 10;

/// Multiplier from summed factor impacts to the overall score.
pub const SCORE_SCALE: i64 = 10;
/// Rough rescale of the overall score onto a FICO-like range.
pub const FICO_RATIO: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeOp {
    LessThan(f64),
    GreaterEqual(f64),
    Equal(f64),
    Any,
}

impl RangeOp {
    pub fn matches(&self, value: f64) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::GreaterEqual(n) => value >= *n,
            RangeOp::Equal(n) => value == *n,
            RangeOp::Any => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub range: RangeOp,
    pub score: i64,  // 0-100 factor score shown as the percentage
    pub impact: i64, // weighted contribution before display offset
}

/// Credit utilization percentage -> (score, impact), out of 30.
pub const UTILIZATION_BANDS: &[Band] = &[
    Band { range: RangeOp::LessThan(30.0), score: 100, impact: 30 },
    Band { range: RangeOp::LessThan(50.0), score: 80, impact: 24 },
    Band { range: RangeOp::LessThan(70.0), score: 60, impact: 18 },
    Band { range: RangeOp::Any, score: 40, impact: 12 },
];

/// Distinct account kinds -> (score, impact), out of 10.
pub const DIVERSITY_BANDS: &[Band] = &[
    Band { range: RangeOp::GreaterEqual(4.0), score: 100, impact: 10 },
    Band { range: RangeOp::Equal(3.0), score: 80, impact: 8 },
    Band { range: RangeOp::Equal(2.0), score: 60, impact: 6 },
    Band { range: RangeOp::Any, score: 40, impact: 4 },
];

const NO_BAND: Band = Band {
    range: RangeOp::Any,
    score: 0,
    impact: 0,
};

/// First band whose range matches `value`.
pub fn match_band(bands: &[Band], value: f64) -> Band {
    bands
        .iter()
        .copied()
        .find(|b| b.range.matches(value))
        .unwrap_or(NO_BAND)
}

/// `floor(score / 100 * weight)`, evaluated in the same order as the
/// display percentages so results line up exactly.
pub fn weighted_impact(score: f64, weight: i64) -> i64 {
    (score / 100.0 * weight as f64).floor() as i64
}
