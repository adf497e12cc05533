use super::result::{FactorKind, FactorResult, ScoreResult};

pub const DEFAULT_SCORE: i64 = 674;
pub const DEFAULT_FICO_EQUIVALENT: i64 = 720;
pub const DEFAULT_ON_CHAIN_SCORE: i64 = 68;

/// Canned analysis shown when no bank data is connected.
pub fn default_analysis() -> ScoreResult {
    let canned = [
        (FactorKind::PaymentHistory, 35, 92, true, "payment history"),
        (FactorKind::CreditUtilization, -20, 65, false, "credit utilization"),
        (FactorKind::AccountDiversity, 10, 60, true, "account diversity"),
        (FactorKind::IncomeStability, -10, 55, false, "income stability"),
        (FactorKind::AccountAge, 15, 70, true, "account age"),
    ];

    let factors = canned
        .into_iter()
        .map(|(kind, impact, percentage, positive, topic)| {
            let detail = if kind == FactorKind::PaymentHistory || kind == FactorKind::CreditUtilization
            {
                format!("your real {}", topic)
            } else {
                format!("your {}", topic)
            };
            FactorResult::new(
                kind,
                impact,
                percentage,
                positive,
                format!(
                    "Connect your bank account via Plaid to see {} analysis powered by XAI.",
                    detail
                ),
            )
        })
        .collect();

    ScoreResult {
        error: None,
        score: DEFAULT_SCORE,
        factors,
        fico_equivalent: DEFAULT_FICO_EQUIVALENT,
        vc_count: 0,
        on_chain_score: DEFAULT_ON_CHAIN_SCORE,
    }
}

/// Error-flagged result: the default score fields plus the failure message.
pub fn error_analysis(message: &str) -> ScoreResult {
    ScoreResult {
        error: Some(message.to_string()),
        score: DEFAULT_SCORE,
        factors: vec![FactorResult::new(
            FactorKind::PaymentHistory,
            35,
            92,
            true,
            format!("XAI analysis error: {}. Please check server logs.", message),
        )],
        fico_equivalent: DEFAULT_FICO_EQUIVALENT,
        vc_count: 0,
        on_chain_score: DEFAULT_ON_CHAIN_SCORE,
    }
}
