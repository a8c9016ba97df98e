//! # vntext-pipeline
//!
//! Deterministic normalization pipeline for noisy Vietnamese social-media
//! text: emoticons, teencode, repeated characters, inconsistent
//! punctuation and number formats.
//!
//! The pipeline threads one string through a fixed sequence of stages.
//! All lookup tables are built once at construction and are immutable
//! afterwards, so one pipeline instance can serve concurrent calls.
//!
//! # Example
//!
//! ```
//! use vntext_core::{ProcessOptions, TextNormalizer};
//! use vntext_pipeline::Pipeline;
//!
//! let pipeline = Pipeline::new();
//! let result = pipeline
//!     .normalize("hello :D", ProcessOptions::new())
//!     .unwrap();
//! assert_eq!(result.text, "hello vui");
//! ```

pub mod dicts;
pub mod stages;
pub mod tables;

use std::sync::Arc;

use tracing::{debug, instrument};
use vntext_core::{
    CleanedText, DictionaryConfig, NormResult, PassthroughSentenceNormalizer, ProcessOptions,
    SentenceNormalizer, StageTrace, TextNormalizer,
};

pub use dicts::{load_teencode, load_vocabulary, AcronymTable, VocabularySet};
pub use stages::Stage;

use stages::{default_stages, DiacriticsStage};

/// The normalization pipeline.
///
/// Owns every stage and every table. Stateless per call: the evolving
/// string is created fresh per invocation and nothing is retained between
/// calls.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
    diacritics: DiacriticsStage,
    vocabulary: VocabularySet,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stages.len())
            .field("vocabulary", &self.vocabulary.len())
            .finish()
    }
}

impl Pipeline {
    /// Pipeline with no dictionaries and a pass-through sentence
    /// collaborator. Acronym expansion is a no-op in this configuration.
    pub fn new() -> Self {
        Self::with_collaborators(
            AcronymTable::empty(),
            VocabularySet::new(),
            Arc::new(PassthroughSentenceNormalizer),
        )
    }

    /// Pipeline with explicitly supplied tables and collaborator.
    pub fn with_collaborators(
        acronyms: AcronymTable,
        vocabulary: VocabularySet,
        sentence: Arc<dyn SentenceNormalizer>,
    ) -> Self {
        Self {
            stages: default_stages(acronyms, sentence),
            diacritics: DiacriticsStage::new(),
            vocabulary,
        }
    }

    /// Pipeline with dictionaries loaded from the configured resources.
    /// Missing or corrupt resources degrade to empty tables.
    pub fn from_config(config: &DictionaryConfig, sentence: Arc<dyn SentenceNormalizer>) -> Self {
        let acronyms = config
            .teencode_path
            .as_deref()
            .map(load_teencode)
            .unwrap_or_default();
        let vocabulary = load_vocabulary(&config.vocabulary_paths);
        Self::with_collaborators(acronyms, vocabulary, sentence)
    }

    /// The loaded vocabulary. Not consumed by any stage; exposed for
    /// callers that filter on known-valid words.
    pub fn vocabulary(&self) -> &VocabularySet {
        &self.vocabulary
    }

    /// Stage names in application order, diacritics stripping excluded.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer for Pipeline {
    #[instrument(skip(self, input), fields(input_len = input.len()))]
    fn normalize(&self, input: &str, options: ProcessOptions) -> NormResult<CleanedText> {
        let mut text = input.to_string();
        let mut trace = Vec::new();

        for stage in &self.stages {
            text = stage.apply(&text);
            debug!(stage = stage.name(), output = %text, "stage applied");
            if options.trace_stages {
                trace.push(StageTrace::new(stage.name(), text.clone()));
            }
        }

        if options.strip_diacritics {
            text = self.diacritics.apply(&text);
            debug!(stage = self.diacritics.name(), output = %text, "stage applied");
            if options.trace_stages {
                trace.push(StageTrace::new(self.diacritics.name(), text.clone()));
            }
        }

        let text = text.trim().to_string();
        Ok(CleanedText::with_trace(text, trace))
    }
}
