pub mod engine;
pub mod factors;
pub mod fallback;
pub mod result;

pub use engine::{calculate_score, Aggregates, ScoreComponents};
pub use factors::{match_band, Band, RangeOp};
pub use fallback::{default_analysis, error_analysis};
pub use result::{FactorKind, FactorResult, ScoreResult};
