use super::config::QuestConfig;

/// Validate quest thresholds at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_quests(config: &QuestConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let amounts = [
        ("fast_food_limit", config.fast_food_limit),
        ("test_score_target", config.test_score_target),
        ("crypto_income_target", config.crypto_income_target),
        ("nft_income_target", config.nft_income_target),
    ];
    for (name, value) in amounts {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                errors.push(format!("quests.{}: must be a non-negative number", name));
            }
        }
    }

    let ratios = [
        ("utilization_limit", config.utilization_limit),
        ("payment_history_target", config.payment_history_target),
    ];
    for (name, value) in ratios {
        if let Some(v) = value {
            if !(0.0..=1.0).contains(&v) {
                errors.push(format!(
                    "quests.{}: must be a ratio between 0 and 1, got {}",
                    name, v
                ));
            }
        }
    }

    if config.rent_on_time_months == Some(0) {
        errors.push("quests.rent_on_time_months: must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
