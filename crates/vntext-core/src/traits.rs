//! Trait definitions for normalization components.

use crate::error::NormResult;
use crate::types::{CleanedText, ProcessOptions};

/// Text normalization trait.
///
/// Implementations convert raw, informally written text into a cleaner
/// canonical form, handling emoticons, teencode, repeated characters,
/// punctuation, and number formats.
pub trait TextNormalizer: Send + Sync {
    /// Normalize the input text.
    ///
    /// # Arguments
    /// * `input` - Raw input text
    /// * `options` - Per-call flags (diacritics stripping, stage tracing)
    ///
    /// # Returns
    /// Normalized text, with trace records when tracing was requested.
    /// Empty or whitespace-only input is not an error; it normalizes to
    /// the empty string.
    fn normalize(&self, input: &str, options: ProcessOptions) -> NormResult<CleanedText>;
}

/// External sentence-level normalizer invoked once mid-pipeline.
///
/// Implementations perform generic Vietnamese normalization (diacritic
/// placement, sentence boundary conventions). The function must be a pure
/// text-to-text transform with no retry semantics; the pipeline calls it
/// exactly once per invocation.
pub trait SentenceNormalizer: Send + Sync {
    /// Normalize one piece of text at the sentence level.
    fn normalize_sentence(&self, input: &str) -> String;
}

/// Pass-through collaborator for running the pipeline standalone.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughSentenceNormalizer;

impl SentenceNormalizer for PassthroughSentenceNormalizer {
    fn normalize_sentence(&self, input: &str) -> String {
        input.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_is_identity() {
        let norm = PassthroughSentenceNormalizer;
        assert_eq!(norm.normalize_sentence("xin  chào !"), "xin  chào !");
        assert_eq!(norm.normalize_sentence(""), "");
    }
}
