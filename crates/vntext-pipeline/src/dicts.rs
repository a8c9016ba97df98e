//! Dictionary loading collaborator.
//!
//! Parses the externally supplied teencode and vocabulary resources.
//! Loading never raises to the caller: a missing or corrupt resource is
//! logged as a warning and degrades to an empty table, leaving acronym
//! expansion and vocabulary checks as no-ops.

use std::collections::HashMap;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use regex::{NoExpand, Regex};
use tracing::{debug, warn};
use vntext_core::{NormError, NormResult};

use crate::tables::is_significant_character;

/// Set of known-valid words. Held by the pipeline for future filtering;
/// no current stage consumes it.
pub type VocabularySet = HashSet<String>;

/// One compiled teencode expansion rule.
#[derive(Debug)]
struct AcronymRule {
    short: String,
    canonical: String,
    /// Matches the short form bounded by spaces or anchored at either end
    /// of the string.
    bounded: Regex,
    /// Replacement padded with spaces on both sides.
    replacement: String,
}

/// Ordered list of (short form, canonical form) expansion rules.
///
/// Order is significant: rules apply sequentially over the whole text, so
/// an earlier expansion's output can be rewritten again by a later rule.
#[derive(Debug, Default)]
pub struct AcronymTable {
    rules: Vec<AcronymRule>,
}

impl AcronymTable {
    /// Table with no rules; expansion becomes a no-op.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile a table from ordered (short, canonical) pairs. Pairs with
    /// an empty short form are skipped.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut rules = Vec::new();
        for (short, canonical) in pairs {
            if short.is_empty() {
                continue;
            }
            let escaped = regex::escape(&short);
            let pattern = format!(" {escaped} |^{escaped} | {escaped}$");
            match Regex::new(&pattern) {
                Ok(bounded) => {
                    let replacement = format!(" {canonical} ");
                    rules.push(AcronymRule {
                        short,
                        canonical,
                        bounded,
                        replacement,
                    });
                }
                Err(err) => {
                    warn!(short = %short, %err, "skipping unusable teencode entry");
                }
            }
        }
        Self { rules }
    }

    /// Apply every rule in table order, each as one substitution pass.
    pub fn expand(&self, text: &str) -> String {
        let mut text = text.to_string();
        for rule in &self.rules {
            text = rule
                .bounded
                .replace_all(&text, NoExpand(&rule.replacement))
                .into_owned();
        }
        text
    }

    /// Iterate (short, canonical) pairs in application order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules
            .iter()
            .map(|r| (r.short.as_str(), r.canonical.as_str()))
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Load the teencode table from a tab-separated resource, degrading to an
/// empty table on any failure.
pub fn load_teencode(path: &Path) -> AcronymTable {
    match read_teencode(path) {
        Ok(pairs) => {
            debug!(path = %path.display(), entries = pairs.len(), "loaded teencode dictionary");
            AcronymTable::from_pairs(pairs)
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                %err,
                "could not load teencode dictionary, acronym expansion disabled"
            );
            AcronymTable::empty()
        }
    }
}

fn read_teencode(path: &Path) -> NormResult<Vec<(String, String)>> {
    let raw = fs::read_to_string(path)?;
    let mut pairs = Vec::new();
    for line in raw.lines() {
        if line.is_empty() {
            continue;
        }
        match line.split_once('\t') {
            Some((short, canonical)) if !short.is_empty() => {
                pairs.push((short.to_string(), canonical.to_string()));
            }
            _ => {
                warn!(line = %line, "skipping malformed teencode line");
            }
        }
    }
    Ok(pairs)
}

/// Load and merge vocabulary sets from JSON key-listing resources,
/// skipping unreadable files with a warning.
pub fn load_vocabulary(paths: &[PathBuf]) -> VocabularySet {
    let mut vocabulary = VocabularySet::new();
    for path in paths {
        match read_vocabulary_file(path) {
            Ok(words) => {
                debug!(path = %path.display(), entries = words.len(), "loaded vocabulary file");
                vocabulary.extend(words);
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "could not load vocabulary file");
            }
        }
    }
    vocabulary
}

fn read_vocabulary_file(path: &Path) -> NormResult<Vec<String>> {
    let raw = fs::read_to_string(path)?;
    let object: HashMap<String, serde_json::Value> = serde_json::from_str(&raw)
        .map_err(|err| NormError::dictionary_load(path, err.to_string()))?;
    // Single significant characters carry no lexical information.
    Ok(object
        .into_keys()
        .filter(|word| {
            let mut chars = word.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => !is_significant_character(c),
                _ => true,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_expand_bounded_short_form() {
        let table = AcronymTable::from_pairs(vec![("k".to_string(), "không".to_string())]);
        let out = table.expand("k thể tin nổi");
        assert!(out.contains("không thể tin nổi"));
        // Not expanded inside a longer word.
        assert_eq!(table.expand("kk thì sao"), "kk thì sao");
    }

    #[test]
    fn test_expand_cascades_in_order() {
        let table = AcronymTable::from_pairs(vec![
            ("k".to_string(), "ko".to_string()),
            ("ko".to_string(), "không".to_string()),
        ]);
        let out = table.expand("k thể");
        assert!(out.contains("không thể"));
    }

    #[test]
    fn test_expand_at_string_end() {
        let table = AcronymTable::from_pairs(vec![("bt".to_string(), "bình thường".to_string())]);
        let out = table.expand("dạo này bt");
        assert!(out.contains("bình thường"));
    }

    #[test]
    fn test_metacharacters_matched_literally() {
        let table = AcronymTable::from_pairs(vec![("v.v".to_string(), "vân vân".to_string())]);
        assert!(table.expand("sách báo v.v nhé").contains("vân vân"));
        // The dot must not act as a wildcard.
        assert_eq!(table.expand("sách vov nhé"), "sách vov nhé");
    }

    #[test]
    fn test_empty_short_forms_skipped() {
        let table = AcronymTable::from_pairs(vec![(String::new(), "gì đó".to_string())]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_teencode_missing_file_degrades() {
        let table = load_teencode(Path::new("/nonexistent/teencode.txt"));
        assert!(table.is_empty());
        assert_eq!(table.expand("k thể"), "k thể");
    }

    #[test]
    fn test_load_teencode_skips_malformed_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "k\tkhông").unwrap();
        writeln!(file, "no tab here").unwrap();
        writeln!(file, "bt\tbình thường").unwrap();
        file.flush().unwrap();

        let table = load_teencode(file.path());
        assert_eq!(table.len(), 2);
        let entries: Vec<_> = table.entries().collect();
        assert_eq!(entries[0], ("k", "không"));
        assert_eq!(entries[1], ("bt", "bình thường"));
    }

    #[test]
    fn test_load_vocabulary_filters_single_characters() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"nhà": 1, "a": 2, "đi học": 3, "ớ": 4}}"#).unwrap();
        file.flush().unwrap();

        let vocabulary = load_vocabulary(&[file.path().to_path_buf()]);
        assert!(vocabulary.contains("nhà"));
        assert!(vocabulary.contains("đi học"));
        assert!(!vocabulary.contains("a"));
        assert!(!vocabulary.contains("ớ"));
    }

    #[test]
    fn test_load_vocabulary_bad_json_degrades() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();
        file.flush().unwrap();

        let vocabulary = load_vocabulary(&[file.path().to_path_buf()]);
        assert!(vocabulary.is_empty());
    }
}
