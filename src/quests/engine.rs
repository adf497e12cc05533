use super::config::QuestThresholds;
use super::profile::HolisticProfile;
use serde::Serialize;

/// Signals the quest rules look at, derived from one holistic profile.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestFeatures {
    pub income: f64,
    pub balance: f64,
    pub utilization: f64,
    pub payment_history: f64,
    pub fast_food_spend: f64,
    pub rent_paid_late: bool,
    pub is_student: bool,
    pub test_score_avg: f64,
    pub github_commits: u32,
    pub dao_member: bool,
    pub crypto_income: f64,
    pub nft_income: f64,
}

impl QuestFeatures {
    /// Fast food spend and late rent come from the transaction list, not
    /// the profile's precomputed fields.
    pub fn from_profile(profile: &HolisticProfile) -> Self {
        let fast_food_spend = profile
            .transactions
            .iter()
            .filter(|t| t.category.as_deref() == Some("Fast Food"))
            .map(|t| t.amount)
            .sum();
        let rent_paid_late = profile
            .transactions
            .iter()
            .any(|t| t.category.as_deref() == Some("Rent") && t.paid_late);
        let test_score_avg = if profile.test_scores.is_empty() {
            0.0
        } else {
            profile.test_scores.iter().sum::<f64>() / profile.test_scores.len() as f64
        };

        Self {
            income: profile.income,
            balance: profile.balance,
            utilization: profile.utilization,
            payment_history: profile.payment_history,
            fast_food_spend,
            rent_paid_late,
            is_student: profile.is_student,
            test_score_avg,
            github_commits: profile.github_commits,
            dao_member: profile.dao_member,
            crypto_income: profile.crypto_income,
            nft_income: profile.nft_income,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestKind {
    ReduceFastFood,
    PayRentOnTime,
    ReduceUtilization,
    ImprovePaymentHistory,
    RaiseTestScores,
    IncreaseCommits,
    JoinDao,
    IncreaseCryptoIncome,
    IncreaseNftIncome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quest {
    pub kind: QuestKind,
    pub title: String,
}

impl Quest {
    fn new(kind: QuestKind, title: String) -> Self {
        Self { kind, title }
    }
}

/// Apply the threshold rules in order. All comparisons are strict.
pub fn generate_quests(features: &QuestFeatures, t: &QuestThresholds) -> Vec<Quest> {
    let mut quests = Vec::new();

    if features.fast_food_spend > t.fast_food_limit {
        quests.push(Quest::new(
            QuestKind::ReduceFastFood,
            format!("Reduce fast food spending below ${}/month", amount(t.fast_food_limit)),
        ));
    }
    if features.rent_paid_late {
        quests.push(Quest::new(
            QuestKind::PayRentOnTime,
            format!("Pay rent on time for {} months", t.rent_on_time_months),
        ));
    }
    if features.utilization > t.utilization_limit {
        quests.push(Quest::new(
            QuestKind::ReduceUtilization,
            format!("Reduce credit utilization below {}%", percent(t.utilization_limit)),
        ));
    }
    if features.payment_history < t.payment_history_target {
        quests.push(Quest::new(
            QuestKind::ImprovePaymentHistory,
            format!("Improve payment history above {}%", percent(t.payment_history_target)),
        ));
    }
    if features.is_student && features.test_score_avg < t.test_score_target {
        quests.push(Quest::new(
            QuestKind::RaiseTestScores,
            format!("Increase test score average above {}", amount(t.test_score_target)),
        ));
    }
    if features.github_commits < t.github_commits_min {
        quests.push(Quest::new(
            QuestKind::IncreaseCommits,
            "Connect GitHub and increase commits".to_string(),
        ));
    }
    if !features.dao_member {
        quests.push(Quest::new(
            QuestKind::JoinDao,
            "Join a DAO for financial diversity".to_string(),
        ));
    }
    if features.crypto_income < t.crypto_income_target {
        quests.push(Quest::new(
            QuestKind::IncreaseCryptoIncome,
            format!("Increase crypto income above ${}", amount(t.crypto_income_target)),
        ));
    }
    if features.nft_income < t.nft_income_target {
        quests.push(Quest::new(
            QuestKind::IncreaseNftIncome,
            format!("Increase NFT income above ${}", amount(t.nft_income_target)),
        ));
    }

    quests
}

/// "200" for whole numbers, "199.5" otherwise.
fn amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Ratio as a whole percentage: 0.3 -> "30".
fn percent(ratio: f64) -> String {
    format!("{:.0}", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plaid::Transaction;

    fn model_citizen() -> QuestFeatures {
        QuestFeatures {
            income: 5000.0,
            balance: 2000.0,
            utilization: 0.1,
            payment_history: 0.99,
            fast_food_spend: 40.0,
            rent_paid_late: false,
            is_student: false,
            test_score_avg: 0.0,
            github_commits: 50,
            dao_member: true,
            crypto_income: 900.0,
            nft_income: 300.0,
        }
    }

    fn titles(features: &QuestFeatures) -> Vec<String> {
        generate_quests(features, &QuestThresholds::default())
            .into_iter()
            .map(|q| q.title)
            .collect()
    }

    #[test]
    fn test_no_quests_when_all_targets_met() {
        assert!(titles(&model_citizen()).is_empty());
    }

    #[test]
    fn test_all_quests_in_order() {
        let features = QuestFeatures {
            utilization: 0.8,
            payment_history: 0.7,
            fast_food_spend: 450.0,
            rent_paid_late: true,
            is_student: true,
            test_score_avg: 65.0,
            github_commits: 2,
            dao_member: false,
            crypto_income: 0.0,
            nft_income: 0.0,
            ..model_citizen()
        };
        assert_eq!(
            titles(&features),
            vec![
                "Reduce fast food spending below $200/month",
                "Pay rent on time for 3 months",
                "Reduce credit utilization below 30%",
                "Improve payment history above 90%",
                "Increase test score average above 80",
                "Connect GitHub and increase commits",
                "Join a DAO for financial diversity",
                "Increase crypto income above $500",
                "Increase NFT income above $200",
            ]
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        let features = QuestFeatures {
            fast_food_spend: 200.0,
            utilization: 0.3,
            payment_history: 0.9,
            github_commits: 10,
            crypto_income: 500.0,
            nft_income: 200.0,
            ..model_citizen()
        };
        assert!(titles(&features).is_empty());
    }

    #[test]
    fn test_test_scores_only_for_students() {
        let features = QuestFeatures {
            is_student: false,
            test_score_avg: 10.0,
            ..model_citizen()
        };
        assert!(titles(&features).is_empty());
    }

    #[test]
    fn test_custom_thresholds_in_titles() {
        let thresholds = QuestThresholds {
            fast_food_limit: 99.5,
            utilization_limit: 0.25,
            ..Default::default()
        };
        let features = QuestFeatures {
            fast_food_spend: 100.0,
            utilization: 0.26,
            ..model_citizen()
        };
        let quests = generate_quests(&features, &thresholds);
        assert_eq!(quests[0].kind, QuestKind::ReduceFastFood);
        assert_eq!(quests[0].title, "Reduce fast food spending below $99.5/month");
        assert_eq!(quests[1].title, "Reduce credit utilization below 25%");
    }

    #[test]
    fn test_features_from_transactions() {
        let profile = HolisticProfile {
            fast_food_spend: 9999.0, // ignored in favour of the transactions
            test_scores: vec![70.0, 80.0, 96.0],
            transactions: vec![
                Transaction {
                    amount: 120.0,
                    category: Some("Fast Food".to_string()),
                    ..Default::default()
                },
                Transaction {
                    amount: 95.0,
                    category: Some("Fast Food".to_string()),
                    ..Default::default()
                },
                Transaction {
                    amount: 1400.0,
                    category: Some("Rent".to_string()),
                    paid_late: true,
                    ..Default::default()
                },
                Transaction {
                    amount: 30.0,
                    category: Some("Groceries".to_string()),
                    paid_late: true,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let features = QuestFeatures::from_profile(&profile);
        assert_eq!(features.fast_food_spend, 215.0);
        assert!(features.rent_paid_late);
        assert_eq!(features.test_score_avg, 82.0);
    }

    #[test]
    fn test_no_test_scores_average_zero() {
        let features = QuestFeatures::from_profile(&HolisticProfile::default());
        assert_eq!(features.test_score_avg, 0.0);
        assert!(!features.rent_paid_late);
    }
}
