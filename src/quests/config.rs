use serde::{Deserialize, Serialize};

/// Thresholds that decide which quests a user receives.
///
/// Every field is optional; unset fields use the built-in default.
///
/// Example YAML:
/// ```yaml
/// quests:
///   fast_food_limit: 150
///   utilization_limit: 0.25
///   github_commits_min: 20
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuestConfig {
    /// Monthly fast food spend above this triggers a quest (default: 200)
    #[serde(default)]
    pub fast_food_limit: Option<f64>,

    /// Months of on-time rent asked for after a late payment (default: 3)
    #[serde(default)]
    pub rent_on_time_months: Option<u32>,

    /// Credit utilization ratio (0-1) above which to reduce (default: 0.3)
    #[serde(default)]
    pub utilization_limit: Option<f64>,

    /// Payment history ratio (0-1) to reach (default: 0.9)
    #[serde(default)]
    pub payment_history_target: Option<f64>,

    /// Average test score students should reach (default: 80)
    #[serde(default)]
    pub test_score_target: Option<f64>,

    /// Minimum GitHub commits (default: 10)
    #[serde(default)]
    pub github_commits_min: Option<u32>,

    /// Crypto income to reach (default: 500)
    #[serde(default)]
    pub crypto_income_target: Option<f64>,

    /// NFT income to reach (default: 200)
    #[serde(default)]
    pub nft_income_target: Option<f64>,
}

/// Fully-resolved thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuestThresholds {
    pub fast_food_limit: f64,
    pub rent_on_time_months: u32,
    pub utilization_limit: f64,
    pub payment_history_target: f64,
    pub test_score_target: f64,
    pub github_commits_min: u32,
    pub crypto_income_target: f64,
    pub nft_income_target: f64,
}

impl Default for QuestThresholds {
    fn default() -> Self {
        Self {
            fast_food_limit: 200.0,
            rent_on_time_months: 3,
            utilization_limit: 0.3,
            payment_history_target: 0.9,
            test_score_target: 80.0,
            github_commits_min: 10,
            crypto_income_target: 500.0,
            nft_income_target: 200.0,
        }
    }
}

impl QuestConfig {
    pub fn thresholds(&self) -> QuestThresholds {
        let d = QuestThresholds::default();
        QuestThresholds {
            fast_food_limit: self.fast_food_limit.unwrap_or(d.fast_food_limit),
            rent_on_time_months: self.rent_on_time_months.unwrap_or(d.rent_on_time_months),
            utilization_limit: self.utilization_limit.unwrap_or(d.utilization_limit),
            payment_history_target: self
                .payment_history_target
                .unwrap_or(d.payment_history_target),
            test_score_target: self.test_score_target.unwrap_or(d.test_score_target),
            github_commits_min: self.github_commits_min.unwrap_or(d.github_commits_min),
            crypto_income_target: self.crypto_income_target.unwrap_or(d.crypto_income_target),
            nft_income_target: self.nft_income_target.unwrap_or(d.nft_income_target),
        }
    }
}
