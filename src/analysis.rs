use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::plaid::load_scoring_input;
use crate::scoring::{calculate_score, default_analysis, ScoreResult};

/// Load Plaid data and score it, or fall back to the canned analysis when
/// no usable data is available.
///
/// Missing, unreadable, unparsable and empty files all take the fallback.
/// An `Err` means the analysis itself failed; the caller reports it as an
/// error-flagged result.
pub fn analyze(path: Option<&Path>, config: &Config) -> Result<ScoreResult> {
    let input = load_scoring_input(path, &config.search_paths())?;
    match input {
        Some(input) => Ok(calculate_score(&input)),
        None => {
            tracing::warn!("No Plaid data found. Using default analysis.");
            Ok(default_analysis())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputConfig;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn write_temp(name: &str, content: &[u8]) -> PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn isolated_config() -> Config {
        Config {
            input: Some(InputConfig {
                search_paths: Some(vec![]),
                holistic_pattern: None,
            }),
            quests: None,
        }
    }

    #[test]
    fn test_unreadable_file_falls_back() {
        let path = write_temp("credit_xai_test_analysis_utf8.json", &[0xff, 0xfe, b'{', b'}']);
        let result = analyze(Some(&path), &isolated_config()).unwrap();
        assert_eq!(result, default_analysis());
        assert!(!result.is_error());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_empty_document_falls_back() {
        for (name, content) in [
            ("credit_xai_test_analysis_empty_object.json", "{}"),
            ("credit_xai_test_analysis_empty_array.json", "[]"),
            ("credit_xai_test_analysis_null.json", "null"),
        ] {
            let path = write_temp(name, content.as_bytes());
            let result = analyze(Some(&path), &isolated_config()).unwrap();
            assert_eq!(result.score, 674);
            assert_eq!(result.fico_equivalent, 720);
            assert_eq!(result.on_chain_score, 68);
            let _ = fs::remove_file(&path);
        }
    }

    #[test]
    fn test_no_input_anywhere_falls_back() {
        let result = analyze(None, &isolated_config()).unwrap();
        assert_eq!(result, default_analysis());
    }

    #[test]
    fn test_document_with_data_is_scored() {
        let path = write_temp(
            "credit_xai_test_analysis_scored.json",
            br#"{"accounts": [], "transactions": []}"#,
        );
        let result = analyze(Some(&path), &isolated_config()).unwrap();
        assert_eq!(result.score, 630);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_non_object_document_is_an_error() {
        let path = write_temp("credit_xai_test_analysis_list.json", b"[1, 2]");
        assert!(analyze(Some(&path), &isolated_config()).is_err());
        let _ = fs::remove_file(&path);
    }
}
