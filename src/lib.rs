//! Explainable credit scoring from Plaid-style account data.
//!
//! [`scoring::calculate_score`] turns accounts and transactions into an
//! overall score plus five reason codes. [`quests`] turns holistic user
//! profiles into suggested financial action items.

pub mod analysis;
pub mod config;
pub mod output;
pub mod plaid;
pub mod quests;
pub mod scoring;
