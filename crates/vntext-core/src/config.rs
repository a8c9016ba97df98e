//! Configuration structures for dictionary resources.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Locations of the externally supplied dictionary resources.
///
/// Every resource is optional: a missing or corrupt file degrades to an
/// empty table, and the pipeline keeps operating with acronym expansion
/// and vocabulary checks as no-ops.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Tab-separated teencode pairs, one `short<TAB>canonical` per line.
    #[serde(default)]
    pub teencode_path: Option<PathBuf>,

    /// JSON objects whose keys are known-valid words. Single-character
    /// entries are filtered out at load time.
    #[serde(default)]
    pub vocabulary_paths: Vec<PathBuf>,
}

impl DictionaryConfig {
    /// Config with no resources configured.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set the teencode resource path.
    pub fn with_teencode(mut self, path: impl Into<PathBuf>) -> Self {
        self.teencode_path = Some(path.into());
        self
    }

    /// Add a vocabulary resource path.
    pub fn with_vocabulary(mut self, path: impl Into<PathBuf>) -> Self {
        self.vocabulary_paths.push(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = DictionaryConfig::empty()
            .with_teencode("dicts/teencode.txt")
            .with_vocabulary("dicts/words.json")
            .with_vocabulary("dicts/single_words.json");

        assert_eq!(
            config.teencode_path.as_deref(),
            Some(std::path::Path::new("dicts/teencode.txt"))
        );
        assert_eq!(config.vocabulary_paths.len(), 2);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: DictionaryConfig = serde_json::from_str("{}").unwrap();
        assert!(config.teencode_path.is_none());
        assert!(config.vocabulary_paths.is_empty());

        let config: DictionaryConfig =
            serde_json::from_str(r#"{"teencode_path": "tc.txt"}"#).unwrap();
        assert!(config.teencode_path.is_some());
    }
}
