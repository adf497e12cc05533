use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Scorer input as exported from Plaid: accounts plus transactions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ScoringInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accounts: Vec<FinancialAccount>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FinancialAccount {
    #[serde(default, deserialize_with = "null_as_default")]
    pub balances: Balances,
    #[serde(default)]
    pub subtype: Option<String>, // "credit card", "checking", "loan", ...
    #[serde(default, rename = "type")]
    pub kind: Option<String>, // "credit", "depository", ...
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Balances {
    #[serde(default, deserialize_with = "null_as_default")]
    pub current: f64,
    #[serde(default)]
    pub limit: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Transaction {
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64, // >= 0 counts as on-time/positive
    #[serde(default)]
    pub date: Option<String>, // ISO date, "2024-03-18"
    #[serde(
        default,
        deserialize_with = "category_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>, // Plaid's merchant description
    #[serde(default, deserialize_with = "null_as_default")]
    pub paid_late: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_finance_category: Option<PersonalFinanceCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PersonalFinanceCategory {
    #[serde(default)]
    pub primary: Option<String>, // "INCOME", "FOOD_AND_DRINK", ...
    #[serde(default)]
    pub detailed: Option<String>, // "FOOD_AND_DRINK_FAST_FOOD", ...
}

impl FinancialAccount {
    pub fn is_credit_card(&self) -> bool {
        self.subtype.as_deref() == Some("credit card")
    }

    /// Subtype when present, otherwise type, otherwise empty.
    pub fn kind_label(&self) -> &str {
        self.subtype
            .as_deref()
            .or(self.kind.as_deref())
            .unwrap_or("")
    }
}

impl Transaction {
    pub fn is_positive(&self) -> bool {
        self.amount >= 0.0
    }

    /// Parse the ISO date, ignoring any time component.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let date = self.date.as_deref()?.trim();
        let day = date.get(..10).unwrap_or(date);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    /// Vendor when set, otherwise Plaid's `name` description.
    pub fn merchant(&self) -> Option<&str> {
        self.vendor.as_deref().or(self.name.as_deref())
    }

    pub fn category_contains(&self, needle: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(&needle.to_lowercase()))
    }

    pub fn pfc_primary(&self) -> Option<&str> {
        self.personal_finance_category
            .as_ref()
            .and_then(|p| p.primary.as_deref())
    }

    pub fn pfc_detailed(&self) -> Option<&str> {
        self.personal_finance_category
            .as_ref()
            .and_then(|p| p.detailed.as_deref())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Plaid sends categories as a hierarchy list, generated data as a plain string.
fn category_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Category {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<Category>::deserialize(deserializer)? {
        Some(Category::One(s)) => Some(s),
        Some(Category::Many(parts)) => Some(parts.join(", ")),
        None => None,
    })
}
