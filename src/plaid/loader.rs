use super::types::ScoringInput;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Locations searched relative to the working directory when no path is given.
pub const DEFAULT_SEARCH_PATHS: &[&str] = &[
    "plaid_node/plaid_user_data.json",
    "../plaid_node/plaid_user_data.json",
];

/// Default search order: next to the install root first (the directory
/// above the executable's), then the working-directory candidates.
pub fn default_search_paths() -> Vec<PathBuf> {
    let install_root = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().and_then(Path::parent).map(Path::to_path_buf));

    install_root
        .map(|root| root.join(DEFAULT_SEARCH_PATHS[0]))
        .into_iter()
        .chain(DEFAULT_SEARCH_PATHS.iter().map(PathBuf::from))
        .collect()
}

/// Pick the input file: the explicit path if given, otherwise the first
/// search path that exists.
pub fn resolve_input_path(explicit: Option<&Path>, search_paths: &[PathBuf]) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    search_paths.iter().find(|p| p.exists()).cloned()
}

/// `null`, `{}` and `[]` carry no Plaid data at all.
fn is_empty_document(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Load scorer input from a Plaid JSON export.
///
/// Returns `Ok(None)` when no file is found, the file cannot be read or
/// parsed, or the document is empty; the caller falls back to the default
/// analysis in that case. A non-empty document that is not a JSON object
/// is an error.
pub fn load_scoring_input(
    explicit: Option<&Path>,
    search_paths: &[PathBuf],
) -> Result<Option<ScoringInput>> {
    let Some(path) = resolve_input_path(explicit, search_paths) else {
        tracing::debug!(candidates = search_paths.len(), "no Plaid data file in search paths");
        return Ok(None);
    };

    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("Plaid data file not found: {}", path.display());
            return Ok(None);
        }
        Err(e) => {
            tracing::warn!("Error loading Plaid data from {}: {}", path.display(), e);
            return Ok(None);
        }
    };

    let value: Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("Error loading Plaid data from {}: {}", path.display(), e);
            return Ok(None);
        }
    };

    if is_empty_document(&value) {
        tracing::warn!("No Plaid data in {}", path.display());
        return Ok(None);
    }
    if !value.is_object() {
        anyhow::bail!("Plaid data in {} must be a JSON object", path.display());
    }

    match serde_json::from_value::<ScoringInput>(value) {
        Ok(input) => {
            tracing::debug!(
                path = %path.display(),
                accounts = input.accounts.len(),
                transactions = input.transactions.len(),
                "loaded Plaid data"
            );
            Ok(Some(input))
        }
        Err(e) => {
            tracing::warn!("Error loading Plaid data from {}: {}", path.display(), e);
            Ok(None)
        }
    }
}

/// Strict variant used by `convert`: any missing, unparsable or non-object
/// file is an error.
pub fn read_plaid_file(path: &Path) -> Result<ScoringInput> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read Plaid data at {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse Plaid data: invalid JSON in {}", path.display()))?;
    if !value.is_object() {
        anyhow::bail!("Plaid data in {} must be a JSON object", path.display());
    }
    serde_json::from_value(value)
        .with_context(|| format!("Failed to parse Plaid data in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_explicit_path_loads() {
        let path = temp_file(
            "credit_xai_test_loader_ok.json",
            r#"{"accounts": [], "transactions": [{"amount": 5}]}"#,
        );
        let input = load_scoring_input(Some(&path), &[]).unwrap().unwrap();
        assert_eq!(input.transactions.len(), 1);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_explicit_path_is_none() {
        let path = env::temp_dir().join("credit_xai_test_loader_missing.json");
        let _ = fs::remove_file(&path);
        assert!(load_scoring_input(Some(&path), &[]).unwrap().is_none());
    }

    #[test]
    fn test_unparsable_file_is_none() {
        let path = temp_file("credit_xai_test_loader_bad.json", "not json");
        assert!(load_scoring_input(Some(&path), &[]).unwrap().is_none());
        assert!(read_plaid_file(&path).is_err());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_search_paths_first_existing_wins() {
        let missing = env::temp_dir().join("credit_xai_test_loader_nope.json");
        let _ = fs::remove_file(&missing);
        let present = temp_file("credit_xai_test_loader_search.json", "{}");

        let resolved = resolve_input_path(None, &[missing, present.clone()]);
        assert_eq!(resolved, Some(present.clone()));
        let _ = fs::remove_file(&present);
    }

    #[test]
    fn test_no_search_paths_is_none() {
        assert!(load_scoring_input(None, &[]).unwrap().is_none());
    }

    #[test]
    fn test_empty_object_is_none() {
        let path = temp_file("credit_xai_test_loader_empty_object.json", "{}");
        assert!(load_scoring_input(Some(&path), &[]).unwrap().is_none());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_empty_array_and_null_are_none() {
        let path = temp_file("credit_xai_test_loader_empty_array.json", "[]");
        assert!(load_scoring_input(Some(&path), &[]).unwrap().is_none());
        let _ = fs::remove_file(&path);

        let path = temp_file("credit_xai_test_loader_null.json", "null");
        assert!(load_scoring_input(Some(&path), &[]).unwrap().is_none());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_empty_lists_still_load() {
        let path = temp_file(
            "credit_xai_test_loader_empty_lists.json",
            r#"{"accounts": [], "transactions": []}"#,
        );
        let input = load_scoring_input(Some(&path), &[]).unwrap().unwrap();
        assert!(input.accounts.is_empty());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_utf8_is_none() {
        let path = env::temp_dir().join("credit_xai_test_loader_utf8.json");
        fs::write(&path, [0xff, 0xfe, b'{', b'}']).unwrap();
        assert!(load_scoring_input(Some(&path), &[]).unwrap().is_none());
        assert!(read_plaid_file(&path).is_err());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_directory_path_is_none() {
        let dir = env::temp_dir().join("credit_xai_test_loader_dir");
        fs::create_dir_all(&dir).unwrap();
        assert!(load_scoring_input(Some(&dir), &[]).unwrap().is_none());
    }

    #[test]
    fn test_non_object_document_errors() {
        let path = temp_file("credit_xai_test_loader_list.json", "[[], []]");
        assert!(load_scoring_input(Some(&path), &[]).is_err());
        assert!(read_plaid_file(&path).is_err());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_default_search_paths_end_with_working_dir_candidates() {
        let paths = default_search_paths();
        let tail: Vec<_> = paths.iter().rev().take(2).rev().cloned().collect();
        assert_eq!(
            tail,
            vec![
                PathBuf::from("plaid_node/plaid_user_data.json"),
                PathBuf::from("../plaid_node/plaid_user_data.json")
            ]
        );
        assert!(paths.len() <= 3);
    }
}
