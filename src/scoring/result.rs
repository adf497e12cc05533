use serde::{Deserialize, Serialize};

/// The five reason codes, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorKind {
    PaymentHistory,
    CreditUtilization,
    AccountDiversity,
    IncomeStability,
    AccountAge,
}

impl FactorKind {
    pub const ALL: [FactorKind; 5] = [
        FactorKind::PaymentHistory,
        FactorKind::CreditUtilization,
        FactorKind::AccountDiversity,
        FactorKind::IncomeStability,
        FactorKind::AccountAge,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FactorKind::PaymentHistory => "Payment History",
            FactorKind::CreditUtilization => "Credit Utilization",
            FactorKind::AccountDiversity => "Account Diversity",
            FactorKind::IncomeStability => "Income Stability",
            FactorKind::AccountAge => "Account Age",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorResult {
    pub name: String,
    pub impact: i64,
    pub percentage: i64,
    pub positive: bool,
    pub explanation: String,
}

impl FactorResult {
    pub fn new(
        kind: FactorKind,
        impact: i64,
        percentage: i64,
        positive: bool,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            name: kind.name().to_string(),
            impact,
            percentage,
            positive,
            explanation: explanation.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub score: i64,
    pub factors: Vec<FactorResult>,
    pub fico_equivalent: i64,
    pub vc_count: u32, // filled in by the caller
    pub on_chain_score: i64,
}

impl ScoreResult {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn with_vc_count(mut self, vc_count: u32) -> Self {
        self.vc_count = vc_count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_order() {
        let names: Vec<_> = FactorKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            vec![
                "Payment History",
                "Credit Utilization",
                "Account Diversity",
                "Income Stability",
                "Account Age"
            ]
        );
    }

    #[test]
    fn test_serializes_camel_case_without_error() {
        let result = ScoreResult {
            error: None,
            score: 590,
            factors: vec![FactorResult::new(
                FactorKind::AccountAge,
                -3,
                70,
                true,
                "Good credit history length.",
            )],
            fico_equivalent: 501,
            vc_count: 0,
            on_chain_score: 59,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["ficoEquivalent"], 501);
        assert_eq!(json["vcCount"], 0);
        assert_eq!(json["onChainScore"], 59);
        assert_eq!(json["factors"][0]["name"], "Account Age");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_with_vc_count() {
        let result = crate::scoring::default_analysis().with_vc_count(3);
        assert_eq!(result.vc_count, 3);
        assert!(!result.is_error());
    }
}
