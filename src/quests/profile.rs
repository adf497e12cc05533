use crate::plaid::{ScoringInput, Transaction};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default glob for holistic profile files in the working directory.
pub const DEFAULT_HOLISTIC_PATTERN: &str = "holistic_user_data_user*.json";

// Values Plaid cannot supply yet.
const PLACEHOLDER_ACCOUNT_AGE: f64 = 12.0;
const PLACEHOLDER_PAYMENT_HISTORY: f64 = 1.0;

/// Financial plus non-traditional signals for one user.
///
/// Ratios (`utilization`, `payment_history`) are fractions in 0..=1.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HolisticProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub income: f64,
    pub balance: f64,
    pub utilization: f64,
    pub account_age: f64,
    pub avg_account_age: f64,
    pub credit_accounts: u32,
    pub loan_accounts: u32,
    pub new_accounts: u32,
    pub payment_history: f64,
    pub fast_food_spend: f64,
    #[serde(deserialize_with = "flag")]
    pub rent_paid_late: bool,
    #[serde(deserialize_with = "flag")]
    pub is_student: bool,
    pub test_scores: Vec<f64>,
    pub github_commits: u32,
    #[serde(deserialize_with = "flag")]
    pub dao_member: bool,
    pub crypto_income: f64,
    pub nft_income: f64,
    pub transactions: Vec<Transaction>,
}

impl HolisticProfile {
    /// Derive a profile from a Plaid export. Signals Plaid does not carry
    /// are filled with neutral placeholders.
    pub fn from_plaid(plaid: &ScoringInput) -> Self {
        let accounts = &plaid.accounts;
        let transactions = &plaid.transactions;

        Self {
            user_id: Some(plaid.user_id.clone().unwrap_or_else(|| "unknown".to_string())),
            income: transactions
                .iter()
                .filter(|t| t.pfc_primary() == Some("INCOME"))
                .map(|t| t.amount)
                .sum(),
            balance: accounts.iter().map(|a| a.balances.current).sum(),
            utilization: 0.0,
            account_age: PLACEHOLDER_ACCOUNT_AGE,
            avg_account_age: PLACEHOLDER_ACCOUNT_AGE,
            credit_accounts: count(accounts.iter().filter(|a| a.is_credit_card())),
            loan_accounts: count(accounts.iter().filter(|a| a.subtype.as_deref() == Some("loan"))),
            new_accounts: count(accounts.iter().filter(|a| a.kind.as_deref() == Some("depository"))),
            payment_history: PLACEHOLDER_PAYMENT_HISTORY,
            fast_food_spend: transactions
                .iter()
                .filter(|t| {
                    t.pfc_detailed()
                        .is_some_and(|d| d.to_lowercase().contains("fast_food"))
                })
                .map(|t| t.amount)
                .sum(),
            rent_paid_late: false,
            is_student: false,
            test_scores: Vec::new(),
            github_commits: 0,
            dao_member: false,
            crypto_income: 0.0,
            nft_income: 0.0,
            transactions: transactions.clone(),
        }
    }

    pub fn user_label(&self) -> &str {
        self.user_id.as_deref().unwrap_or("unknown")
    }

    /// File name used when persisting: `holistic_user_data_{user_id}.json`.
    /// Characters other than ASCII alphanumerics, `-`, `_` and `.` become
    /// `_` so the name always stays inside the output directory.
    pub fn file_name(&self) -> String {
        let label: String = self
            .user_label()
            .chars()
            .map(|c| match c {
                c if c.is_ascii_alphanumeric() => c,
                '-' | '_' | '.' => c,
                _ => '_',
            })
            .collect();
        format!("holistic_user_data_{}.json", label)
    }
}

fn count<I: Iterator>(iter: I) -> u32 {
    iter.count() as u32
}

/// Accept `true`/`false` as well as `0`/`1` for boolean signals.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(f64),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Number(n)) => n != 0.0,
        None => false,
    })
}

/// Expand a glob pattern into matching profile files, sorted by path.
pub fn discover_profiles(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut paths = glob::glob(pattern)
        .with_context(|| format!("Invalid holistic file pattern '{}'", pattern))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Skipping unreadable path: {}", e);
                None
            }
        })
        .collect::<Vec<_>>();
    paths.sort();
    Ok(paths)
}

pub fn load_profile(path: &Path) -> Result<HolisticProfile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read holistic profile at {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse holistic profile in {}", path.display()))
}

/// Write a profile into `dir` atomically and return the file path.
pub fn save_profile(dir: &Path, profile: &HolisticProfile) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory at {}", dir.display()))?;
    }
    let path = dir.join(profile.file_name());

    let mut file = AtomicWriteFile::open(&path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, profile).context("Failed to serialize holistic profile")?;
    file.commit()
        .with_context(|| format!("Failed to save holistic profile at {}", path.display()))?;

    Ok(path)
}
