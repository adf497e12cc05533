use super::factors::{
    match_band, weighted_impact, Band, DIVERSITY_BANDS, FICO_RATIO, SCORE_SCALE,
    UTILIZATION_BANDS, WEIGHT_ACCOUNT_AGE, WEIGHT_ACCOUNT_DIVERSITY, WEIGHT_INCOME_STABILITY,
    WEIGHT_PAYMENT_HISTORY, WEIGHT_UTILIZATION,
};
use super::result::{FactorKind, FactorResult, ScoreResult};
use crate::plaid::ScoringInput;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Amounts above this count as an income deposit even without an income category.
const INCOME_AMOUNT_THRESHOLD: f64 = 1000.0;
const PAYMENT_EXCELLENT: f64 = 90.0;

/// Raw metrics pulled out of the accounts and transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    pub total_balance: f64,
    pub credit_accounts: usize,
    pub total_credit_limit: f64,
    pub total_credit_used: f64,
    pub transaction_count: usize,
    pub on_time_count: usize,
    pub income_tx_count: usize,
    pub diversity_count: usize,
    pub history_start: Option<NaiveDate>,
}

impl Aggregates {
    pub fn from_input(input: &ScoringInput) -> Self {
        let credit: Vec<_> = input.accounts.iter().filter(|a| a.is_credit_card()).collect();

        let kinds: BTreeSet<&str> = input.accounts.iter().map(|a| a.kind_label()).collect();

        Self {
            total_balance: input.accounts.iter().map(|a| a.balances.current).sum(),
            credit_accounts: credit.len(),
            total_credit_limit: credit
                .iter()
                .map(|a| a.balances.limit.unwrap_or(0.0))
                .sum(),
            total_credit_used: credit
                .iter()
                .filter(|a| a.balances.current < 0.0)
                .map(|a| a.balances.current.abs())
                .sum(),
            transaction_count: input.transactions.len(),
            on_time_count: input.transactions.iter().filter(|t| t.is_positive()).count(),
            income_tx_count: input
                .transactions
                .iter()
                .filter(|t| t.category_contains("income") || t.amount > INCOME_AMOUNT_THRESHOLD)
                .count(),
            diversity_count: kinds.len(),
            history_start: input.transactions.iter().filter_map(|t| t.parsed_date()).min(),
        }
    }

    /// On-time share of transactions as a 0-100 score; 50 with no history.
    pub fn payment_history_score(&self) -> f64 {
        if self.transaction_count == 0 {
            return 50.0;
        }
        (self.on_time_count as f64 / self.transaction_count.max(1) as f64 * 100.0).min(100.0)
    }

    /// Share of revolving credit drawn, as a percentage.
    pub fn utilization(&self) -> f64 {
        if self.total_credit_limit > 0.0 {
            self.total_credit_used / self.total_credit_limit * 100.0
        } else {
            0.0
        }
    }

    pub fn income_stability_score(&self) -> i64 {
        if self.income_tx_count > 0 {
            70
        } else {
            50
        }
    }

    /// Placeholder (score, impact) until account open dates are available.
    pub fn account_age(&self) -> (i64, i64) {
        if self.transaction_count > 0 {
            (70, 7)
        } else {
            (50, 5)
        }
    }
}

/// Weighted contributions before the display offset. These feed the
/// overall score; the factor list reports its own offset impacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreComponents {
    pub payment_history: i64,
    pub utilization: i64,
    pub account_diversity: i64,
    pub income_stability: i64,
    pub account_age: i64,
}

impl ScoreComponents {
    pub fn overall(&self) -> i64 {
        (self.payment_history
            + self.utilization
            + self.account_diversity
            + self.income_stability
            + self.account_age)
            * SCORE_SCALE
    }
}

/// Everything the factor list and the overall score are derived from.
#[derive(Debug, Clone)]
struct Evaluation {
    payment_score: f64,
    utilization: f64,
    utilization_band: Band,
    diversity_band: Band,
    income_score: i64,
    age_score: i64,
    components: ScoreComponents,
}

impl Evaluation {
    fn new(agg: &Aggregates) -> Self {
        let payment_score = agg.payment_history_score();
        let utilization = agg.utilization();
        let utilization_band = match_band(UTILIZATION_BANDS, utilization);
        let diversity_band = match_band(DIVERSITY_BANDS, agg.diversity_count as f64);
        let income_score = agg.income_stability_score();
        let (age_score, age_impact) = agg.account_age();

        Self {
            payment_score,
            utilization,
            utilization_band,
            diversity_band,
            income_score,
            age_score,
            components: ScoreComponents {
                payment_history: weighted_impact(payment_score, WEIGHT_PAYMENT_HISTORY),
                utilization: utilization_band.impact,
                account_diversity: diversity_band.impact,
                income_stability: weighted_impact(income_score as f64, WEIGHT_INCOME_STABILITY),
                account_age: age_impact,
            },
        }
    }
}

/// Score a user's accounts and transactions.
///
/// Total and deterministic: empty or partial input falls back to the
/// midpoint defaults instead of failing.
pub fn calculate_score(input: &ScoringInput) -> ScoreResult {
    let agg = Aggregates::from_input(input);
    let eval = Evaluation::new(&agg);

    tracing::debug!(
        total_balance = agg.total_balance,
        credit_accounts = agg.credit_accounts,
        utilization = eval.utilization,
        diversity = agg.diversity_count,
        history_start = ?agg.history_start,
        "aggregated scoring input"
    );

    let factors = FactorKind::ALL
        .iter()
        .map(|kind| build_factor(*kind, &agg, &eval))
        .collect();

    let score = eval.components.overall();
    ScoreResult {
        error: None,
        score,
        factors,
        fico_equivalent: (score as f64 * FICO_RATIO).floor() as i64,
        vc_count: 0,
        on_chain_score: score.div_euclid(SCORE_SCALE),
    }
}

fn build_factor(kind: FactorKind, agg: &Aggregates, eval: &Evaluation) -> FactorResult {
    match kind {
        FactorKind::PaymentHistory => {
            let impact = eval.components.payment_history;
            let verdict = if eval.payment_score >= PAYMENT_EXCELLENT {
                "Excellent consistency!"
            } else {
                "Good payment history."
            };
            FactorResult::new(
                kind,
                impact,
                eval.payment_score.trunc() as i64,
                impact >= 30,
                format!("You have {} positive transactions. {}", agg.on_time_count, verdict),
            )
        }
        FactorKind::CreditUtilization => {
            let percent = eval.utilization.trunc() as i64;
            let verdict = if eval.utilization < 30.0 {
                "Excellent!"
            } else if eval.utilization < 70.0 {
                "Reduce to 30% for optimal score."
            } else {
                "High utilization is hurting your score."
            };
            FactorResult::new(
                kind,
                eval.utilization_band.impact - WEIGHT_UTILIZATION,
                if eval.utilization > 0.0 { percent } else { 0 },
                eval.utilization < 30.0,
                format!("Using {}% of available credit. {}", percent, verdict),
            )
        }
        FactorKind::AccountDiversity => {
            let count = agg.diversity_count;
            let verdict = if count >= 4 {
                "Excellent diversity!"
            } else if count < 3 {
                "Adding more account types would optimize this factor."
            } else {
                "Good account mix."
            };
            FactorResult::new(
                kind,
                eval.diversity_band.impact - WEIGHT_ACCOUNT_DIVERSITY,
                eval.diversity_band.score,
                count >= 3,
                format!(
                    "{} account type{} active. {}",
                    count,
                    if count == 1 { "" } else { "s" },
                    verdict
                ),
            )
        }
        FactorKind::IncomeStability => {
            let stable = eval.income_score >= 70;
            FactorResult::new(
                kind,
                eval.components.income_stability - WEIGHT_INCOME_STABILITY,
                eval.income_score,
                stable,
                if stable {
                    "Consistent income detected."
                } else {
                    "Income varies month-to-month. Consistent income improves creditworthiness."
                },
            )
        }
        FactorKind::AccountAge => {
            let established = eval.age_score >= 70;
            FactorResult::new(
                kind,
                eval.components.account_age - WEIGHT_ACCOUNT_AGE,
                eval.age_score,
                established,
                if established {
                    "Good credit history length."
                } else {
                    "Newer accounts. Building credit history takes time."
                },
            )
        }
    }
}
