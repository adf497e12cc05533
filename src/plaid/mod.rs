pub mod loader;
pub mod types;

pub use loader::{
    default_search_paths, load_scoring_input, read_plaid_file, resolve_input_path,
    DEFAULT_SEARCH_PATHS,
};
pub use types::{Balances, FinancialAccount, PersonalFinanceCategory, ScoringInput, Transaction};
