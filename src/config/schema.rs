use crate::plaid::default_search_paths;
use crate::quests::{QuestConfig, DEFAULT_HOLISTIC_PATTERN};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub input: Option<InputConfig>,
    #[serde(default)]
    pub quests: Option<QuestConfig>,
}

/// Where to look for input files.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Plaid export locations, tried in order when no path is given
    #[serde(default)]
    pub search_paths: Option<Vec<String>>,

    /// Glob for holistic profile files
    #[serde(default)]
    pub holistic_pattern: Option<String>,
}

impl Config {
    pub fn search_paths(&self) -> Vec<PathBuf> {
        match self.input.as_ref().and_then(|i| i.search_paths.as_ref()) {
            Some(paths) => paths.iter().map(PathBuf::from).collect(),
            None => default_search_paths(),
        }
    }

    pub fn holistic_pattern(&self) -> &str {
        self.input
            .as_ref()
            .and_then(|i| i.holistic_pattern.as_deref())
            .unwrap_or(DEFAULT_HOLISTIC_PATTERN)
    }

    pub fn quest_config(&self) -> QuestConfig {
        self.quests.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.search_paths(), default_search_paths());
        let working_dir = [
            PathBuf::from("plaid_node/plaid_user_data.json"),
            PathBuf::from("../plaid_node/plaid_user_data.json"),
        ];
        assert!(config.search_paths().ends_with(&working_dir));
        assert_eq!(config.holistic_pattern(), "holistic_user_data_user*.json");
        assert_eq!(config.quest_config(), QuestConfig::default());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
input:
  search_paths:
    - "data/plaid.json"
  holistic_pattern: "profiles/*.json"
quests:
  fast_food_limit: 150
  github_commits_min: 20
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.search_paths(), vec![PathBuf::from("data/plaid.json")]);
        assert_eq!(config.holistic_pattern(), "profiles/*.json");
        assert_eq!(config.quest_config().fast_food_limit, Some(150.0));
    }

    #[test]
    fn test_empty_search_paths_disable_lookup() {
        let yaml = r#"
input:
  search_paths: []
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert!(config.search_paths().is_empty());
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("scoring: {}");
        assert!(result.is_err());
    }
}
